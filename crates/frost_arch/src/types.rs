//! Shared data types describing sites and their pins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of primitive a site can host.
///
/// The set is closed: adding a site kind forces every exhaustive `match` in
/// the legality dispatcher to take a position on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteType {
    /// A logic cell (`ICESTORM_LC`): 4-input LUT, carry, and flip-flop.
    Logic,
    /// An IO pad (`SB_IO`).
    Io,
    /// A global clock buffer (`SB_GB`).
    GlobalBuffer,
    /// A block RAM (`ICESTORM_RAM`).
    Ram,
    /// A phase-locked loop (`ICESTORM_PLL`).
    Pll,
}

impl SiteType {
    /// Returns the name prefix used for generated site names.
    pub fn name_prefix(self) -> &'static str {
        match self {
            SiteType::Logic => "lc",
            SiteType::Io => "io",
            SiteType::GlobalBuffer => "gb",
            SiteType::Ram => "ram",
            SiteType::Pll => "pll",
        }
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SiteType::Logic => "ICESTORM_LC",
            SiteType::Io => "SB_IO",
            SiteType::GlobalBuffer => "SB_GB",
            SiteType::Ram => "ICESTORM_RAM",
            SiteType::Pll => "ICESTORM_PLL",
        };
        f.write_str(name)
    }
}

/// Site pins whose wires the legality checks look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinTag {
    /// The output of a global buffer, driving one global network.
    GlobalBufferOutput,
}

/// Grid position of a site: tile column, tile row, and index within the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Tile column.
    pub x: u32,
    /// Tile row.
    pub y: u32,
    /// Index of the site within its tile.
    pub z: u32,
}

impl Location {
    /// Creates a location.
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{}/Y{}", self.x, self.y)
    }
}
