use serde::{Deserialize, Serialize};

/// Closed set of behaviors an agent class can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profession {
    /// wood (+ tools) -> food
    Farmer,
    /// food (+ tools) -> wood
    Woodcutter,
    /// food (+ tools) -> ore
    Miner,
    /// food + ore (+ tools) -> metal
    Refiner,
    /// food + metal -> tools
    Blacksmith,
}

impl Profession {
    pub const ALL: [Profession; 5] = [
        Profession::Farmer,
        Profession::Woodcutter,
        Profession::Miner,
        Profession::Refiner,
        Profession::Blacksmith,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Profession::Farmer => "farmer",
            Profession::Woodcutter => "woodcutter",
            Profession::Miner => "miner",
            Profession::Refiner => "refiner",
            Profession::Blacksmith => "blacksmith",
        }
    }

    /// Parse a configured logic name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Profession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
