//! Configuration types deserialized from `frost.toml`.

use serde::Deserialize;

/// Local-routing input budget of an iCE40 logic tile.
pub const DEFAULT_LOCAL_INPUT_BUDGET: usize = 32;

/// Number of logic cells in an iCE40 logic tile.
pub const DEFAULT_TILE_CAPACITY: usize = 8;

/// Largest accepted `legality.local_input_budget`.
pub const MAX_LOCAL_INPUT_BUDGET: usize = 1024;

/// Largest accepted `legality.tile_capacity`.
pub const MAX_TILE_CAPACITY: usize = 64;

/// The top-level checker configuration parsed from `frost.toml`.
///
/// Every section is optional; an empty file yields the iCE40 defaults.
#[derive(Debug, Default, Deserialize)]
pub struct FrostConfig {
    /// Limits enforced by the logic-tile checker.
    #[serde(default)]
    pub legality: LegalityConfig,
    /// Where the fabric description comes from.
    #[serde(default)]
    pub fabric: Option<FabricSource>,
    /// Audit report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Limits enforced by the logic-tile checker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegalityConfig {
    /// Maximum number of distinct non-global nets entering one logic tile.
    #[serde(default = "default_local_input_budget")]
    pub local_input_budget: usize,
    /// Maximum number of logic cells one tile can hold.
    #[serde(default = "default_tile_capacity")]
    pub tile_capacity: usize,
}

impl Default for LegalityConfig {
    fn default() -> Self {
        Self {
            local_input_budget: DEFAULT_LOCAL_INPUT_BUDGET,
            tile_capacity: DEFAULT_TILE_CAPACITY,
        }
    }
}

fn default_local_input_budget() -> usize {
    DEFAULT_LOCAL_INPUT_BUDGET
}

fn default_tile_capacity() -> usize {
    DEFAULT_TILE_CAPACITY
}

/// The origin of the fabric description.
///
/// Either a JSON fabric file or a synthetic iCE40-style grid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FabricSource {
    /// A JSON fabric description on disk.
    File {
        /// Path to the fabric JSON, relative to the configuration file.
        path: String,
    },
    /// A generated grid.
    Grid {
        /// Grid dimensions and IO bonding.
        grid: GridConfig,
    },
}

/// Dimensions of a synthetic iCE40-style grid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    /// Number of tile columns, including the IO ring.
    pub columns: u32,
    /// Number of tile rows, including the IO ring.
    pub rows: u32,
    /// IO site names that have no package pin on this package.
    #[serde(default)]
    pub unbonded_sites: Vec<String>,
}

/// Audit report settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Warn about placed IO cells connected to clock or global nets, whose
    /// clock interaction the checker does not verify.
    #[serde(default = "default_true")]
    pub warn_unchecked_io_clocks: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            warn_unchecked_io_clocks: true,
        }
    }
}

fn default_true() -> bool {
    true
}
