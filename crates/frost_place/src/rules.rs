//! Fabric limits the legality checks enforce.

use frost_config::{LegalityConfig, DEFAULT_LOCAL_INPUT_BUDGET, DEFAULT_TILE_CAPACITY};

/// Per-tile limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalityRules {
    /// Maximum distinct local nets feeding one logic tile.
    pub local_input_budget: usize,
    /// Number of logic cells a tile can hold.
    pub tile_capacity: usize,
}

impl Default for LegalityRules {
    fn default() -> Self {
        Self {
            local_input_budget: DEFAULT_LOCAL_INPUT_BUDGET,
            tile_capacity: DEFAULT_TILE_CAPACITY,
        }
    }
}

impl From<&LegalityConfig> for LegalityRules {
    fn from(config: &LegalityConfig) -> Self {
        Self {
            local_input_budget: config.local_input_budget,
            tile_capacity: config.tile_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_ice40() {
        let rules = LegalityRules::default();
        assert_eq!(rules.local_input_budget, 32);
        assert_eq!(rules.tile_capacity, 8);
    }

    #[test]
    fn from_config() {
        let config = LegalityConfig {
            local_input_budget: 16,
            tile_capacity: 4,
        };
        let rules = LegalityRules::from(&config);
        assert_eq!(rules.local_input_budget, 16);
        assert_eq!(rules.tile_capacity, 4);
    }
}
