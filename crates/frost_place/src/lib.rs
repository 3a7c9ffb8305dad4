//! Netlist, placement, and placement legality checks for iCE40-class fabrics.
//!
//! The [`Legality`] oracle decides whether a cell may sit at a site given
//! what is already placed in the same tile. [`audit`] runs it over a whole
//! placement and reports findings as diagnostics; [`design_file`] loads a
//! placed design from JSON.

#![warn(missing_docs)]

pub mod audit;
pub mod classify;
pub mod constids;
pub mod design_file;
pub mod ids;
pub mod legality;
pub mod netlist;
pub mod placement;
pub mod rules;

pub use audit::{check_placement, AuditReport, Finding};
pub use design_file::{DesignError, DesignFile};
pub use ids::{CellId, NetId};
pub use legality::{ControlPort, Legality, Parity, Rejection, TileScratch, Verdict};
pub use netlist::{
    Cell, CellKind, Net, Netlist, NetlistError, ParamValue, Port, PortDirection, PortRef,
};
pub use placement::{BindStrength, Binding, Placement, PlacementError};
pub use rules::LegalityRules;
