//! The placement legality oracle.
//!
//! [`Legality`] answers two questions for a placement optimizer:
//! is the current occupancy of a site legal ([`Legality::site_is_valid`]),
//! and would binding a cell to a site be legal
//! ([`Legality::cell_is_valid_at`]). Both only look at the sites of one
//! tile, never the whole design.
//!
//! An illegal placement is an ordinary answer (`Ok(false)` or
//! [`Verdict::Illegal`]). A netlist or fabric that breaks the oracle's
//! assumptions is a [`ContractViolation`].

mod global_buffer;
mod io;
mod logic_tile;
pub mod ports;

pub use ports::{ControlNets, ControlPort, DATA_INPUTS};

use crate::ids::{CellId, NetId};
use crate::netlist::{CellKind, Netlist};
use crate::placement::Placement;
use crate::rules::LegalityRules;
use frost_arch::{Architecture, SiteId, SiteType};
use frost_common::{ContractViolation, FrostResult};
use frost_config::{MAX_LOCAL_INPUT_BUDGET, MAX_TILE_CAPACITY};
use std::collections::HashSet;
use std::fmt;

/// Which parity of global network a buffer must sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    /// Even network index; reset distribution.
    Even,
    /// Odd network index; clock-enable distribution.
    Odd,
}

impl Parity {
    /// Returns whether `index` has this parity.
    pub fn matches(self, index: u8) -> bool {
        match self {
            Parity::Even => index % 2 == 0,
            Parity::Odd => index % 2 == 1,
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Parity::Even => "even",
            Parity::Odd => "odd",
        })
    }
}

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A sequential cell's control net differs from the tile's first
    /// sequential cell.
    ControlNetMismatch {
        /// The disagreeing cell.
        cell: CellId,
        /// The port that differs.
        port: ControlPort,
    },
    /// A sequential cell's `NEG_CLK` differs from the tile's first
    /// sequential cell.
    ClockPolarityMismatch {
        /// The disagreeing cell.
        cell: CellId,
    },
    /// Too many distinct local nets enter the tile.
    LocalInputBudget {
        /// Distinct local nets counted.
        used: usize,
        /// The tile's limit.
        budget: usize,
    },
    /// An IO cell sits on a site without a package pin.
    NoPackagePin,
    /// A global buffer feeds both reset and clock-enable inputs.
    GlobalBufferMixedConsumers,
    /// A global buffer sits on a network of the wrong parity.
    GlobalBufferParity {
        /// Network index of the site.
        index: u8,
        /// Parity its consumers require.
        required: Parity,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::ControlNetMismatch { port, .. } => {
                write!(f, "{port} net differs from the tile's other flip-flops")
            }
            Rejection::ClockPolarityMismatch { .. } => {
                f.write_str("clock polarity differs from the tile's other flip-flops")
            }
            Rejection::LocalInputBudget { used, budget } => {
                write!(f, "{used} distinct local nets exceed the tile budget of {budget}")
            }
            Rejection::NoPackagePin => f.write_str("site is not bonded to a package pin"),
            Rejection::GlobalBufferMixedConsumers => {
                f.write_str("global buffer drives both reset and clock-enable inputs")
            }
            Rejection::GlobalBufferParity { index, required } => {
                write!(f, "global network {index} is not {required}")
            }
        }
    }
}

/// The outcome of a legality query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The placement is legal.
    Legal,
    /// The placement is illegal for the given reason.
    Illegal(Rejection),
}

impl Verdict {
    /// Returns whether the verdict is [`Verdict::Legal`].
    pub fn is_legal(self) -> bool {
        matches!(self, Verdict::Legal)
    }

    /// Returns the rejection reason, if any.
    pub fn rejection(self) -> Option<Rejection> {
        match self {
            Verdict::Legal => None,
            Verdict::Illegal(rejection) => Some(rejection),
        }
    }
}

/// Reusable working set for tile checks.
///
/// Owned by the caller so repeated queries do not reallocate and concurrent
/// callers never share state. Contents are only meaningful right after a
/// query.
#[derive(Debug, Clone, Default)]
pub struct TileScratch {
    cells: Vec<CellId>,
    locals: HashSet<NetId>,
}

impl TileScratch {
    /// Creates a working set sized for `rules`.
    ///
    /// Preallocation stops at the largest limits `frost.toml` accepts; rules
    /// built in code beyond that grow the set on demand.
    pub fn new(rules: &LegalityRules) -> Self {
        Self {
            cells: Vec::with_capacity(rules.tile_capacity.min(MAX_TILE_CAPACITY)),
            locals: HashSet::with_capacity(
                rules.local_input_budget.min(MAX_LOCAL_INPUT_BUDGET) + 1,
            ),
        }
    }

    /// Cells gathered by the last logic-tile query.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    /// Number of distinct local nets counted by the last logic-tile query.
    pub fn local_net_count(&self) -> usize {
        self.locals.len()
    }
}

/// Legality oracle over one fabric, netlist, and placement.
#[derive(Debug, Clone, Copy)]
pub struct Legality<'a> {
    arch: &'a dyn Architecture,
    netlist: &'a Netlist,
    placement: &'a Placement,
    rules: LegalityRules,
}

impl<'a> Legality<'a> {
    /// Creates an oracle with default iCE40 rules.
    pub fn new(arch: &'a dyn Architecture, netlist: &'a Netlist, placement: &'a Placement) -> Self {
        Self {
            arch,
            netlist,
            placement,
            rules: LegalityRules::default(),
        }
    }

    /// Replaces the tile limits.
    pub fn with_rules(mut self, rules: LegalityRules) -> Self {
        self.rules = rules;
        self
    }

    /// Returns the fabric.
    pub fn arch(&self) -> &'a dyn Architecture {
        self.arch
    }

    /// Returns the netlist.
    pub fn netlist(&self) -> &'a Netlist {
        self.netlist
    }

    /// Returns the placement.
    pub fn placement(&self) -> &'a Placement {
        self.placement
    }

    /// Returns the tile limits.
    pub fn rules(&self) -> &LegalityRules {
        &self.rules
    }

    /// Creates a working set sized for this oracle's rules.
    pub fn scratch(&self) -> TileScratch {
        TileScratch::new(&self.rules)
    }

    /// Returns whether the current occupancy of `site` is legal.
    ///
    /// For a logic site this checks every cell in the site's tile.
    pub fn site_is_valid(&self, site: SiteId) -> FrostResult<bool> {
        Ok(self.site_verdict(site, &mut self.scratch())?.is_legal())
    }

    /// Returns whether binding `cell` to `site` would be legal, given what
    /// is currently bound around it.
    pub fn cell_is_valid_at(&self, cell: CellId, site: SiteId) -> FrostResult<bool> {
        Ok(self.cell_verdict(cell, site, &mut self.scratch())?.is_legal())
    }

    /// Explains the legality of the current occupancy of `site`.
    ///
    /// Tentative bindings are ignored.
    pub fn site_verdict(&self, site: SiteId, scratch: &mut TileScratch) -> FrostResult<Verdict> {
        match self.arch.site_type(site) {
            SiteType::Logic => {
                scratch.cells.clear();
                for &other in self.arch.co_resident_sites(site) {
                    if let Some(cell) = self.placement.occupant_of(other, false) {
                        scratch.cells.push(cell);
                    }
                }
                self.check_tile(site, scratch)
            }
            SiteType::Io | SiteType::GlobalBuffer | SiteType::Ram | SiteType::Pll => {
                match self.placement.occupant_of(site, false) {
                    None => Ok(Verdict::Legal),
                    Some(cell) => self.cell_verdict(cell, site, scratch),
                }
            }
        }
    }

    /// Explains the legality of binding `cell` to `site`.
    ///
    /// For logic cells, whatever is currently at `site` is treated as
    /// displaced, and `cell` is counted once even if it already sits elsewhere
    /// in the tile.
    ///
    /// # Errors
    ///
    /// Returns a [`ContractViolation`] if the cell kind does not match the
    /// site type, or if a check finds the netlist or fabric malformed.
    pub fn cell_verdict(
        &self,
        cell: CellId,
        site: SiteId,
        scratch: &mut TileScratch,
    ) -> FrostResult<Verdict> {
        let kind = self.netlist.cell(cell).kind;
        let site_type = self.arch.site_type(site);
        if kind.site_type() != site_type {
            return Err(ContractViolation::new(format!(
                "cell '{}' ({kind}) cannot be placed at site '{}' ({site_type})",
                self.netlist.cell(cell).name,
                self.arch.site_name(site)
            )));
        }

        match kind {
            CellKind::Logic => {
                scratch.cells.clear();
                for &other in self.arch.co_resident_sites(site) {
                    if other == site {
                        continue;
                    }
                    match self.placement.occupant_of(other, false) {
                        Some(occupant) if occupant != cell => scratch.cells.push(occupant),
                        _ => {}
                    }
                }
                scratch.cells.push(cell);
                self.check_tile(site, scratch)
            }
            CellKind::Io => Ok(io::check_io(self.arch, site)),
            CellKind::GlobalBuffer => {
                global_buffer::check_global_buffer(self.arch, self.netlist, cell, site)
            }
            // No placement rules are modelled for RAM and PLL sites.
            CellKind::Ram | CellKind::Pll => Ok(Verdict::Legal),
        }
    }

    /// Checks whether `cells` may share one logic tile.
    ///
    /// Whether the verdict is legal does not depend on the order of `cells`;
    /// when several cells disagree, which rejection gets reported may.
    pub fn check_cells(&self, cells: &[CellId], scratch: &mut TileScratch) -> FrostResult<Verdict> {
        logic_tile::check_logic_cells(self.netlist, &self.rules, cells, &mut scratch.locals)
    }

    fn check_tile(&self, site: SiteId, scratch: &mut TileScratch) -> FrostResult<Verdict> {
        if scratch.cells.len() > self.rules.tile_capacity {
            return Err(ContractViolation::new(format!(
                "logic tile {} holds {} cells but its capacity is {}",
                self.arch.site_location(site),
                scratch.cells.len(),
                self.rules.tile_capacity
            )));
        }
        logic_tile::check_logic_cells(self.netlist, &self.rules, &scratch.cells, &mut scratch.locals)
    }
}
