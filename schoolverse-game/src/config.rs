use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STARTING_COINS;

/// Tunables a host may override through a JSON asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyConfig {
    #[serde(default = "default_starting_coins")]
    pub starting_coins: u32,
}

const fn default_starting_coins() -> u32 {
    DEFAULT_STARTING_COINS
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_coins: DEFAULT_STARTING_COINS,
        }
    }
}

impl EconomyConfig {
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
