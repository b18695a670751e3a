use rand::Rng;

/// Port for the run's single source of randomness
///
/// The market only draws from it while shuffling offer books, in a fixed
/// order, so the same seed reproduces the same history:
/// - Any seeded `rand` generator for normal runs
/// - A scripted source for tests that pin down the draw sequence
pub trait RandomSource {
    /// Uniform integer in `low..=high`
    fn int(&mut self, low: usize, high: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn int(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        self.gen_range(low..=high)
    }
}
