use bazaar_ports::RandomSource;

/// Permute `items` in place
///
/// Walks `ii` from `len - 1` down to `2`, swapping `items[ii]` with a uniform
/// `items[j]`, `j` in `0..=ii`. That is exactly `len - 2` draws (none below
/// three items), which is the sequence other runs with the same seed expect.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for ii in (2..items.len()).rev() {
        let j = rng.int(0, ii);
        items.swap(j, ii);
    }
}
