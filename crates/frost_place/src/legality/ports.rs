//! Port sets the logic-tile check reads.

use crate::constids::{CEN, CLK, I0, I1, I2, I3, SR};
use crate::ids::{CellId, NetId};
use crate::netlist::Netlist;
use frost_common::Ident;
use std::fmt;

/// LUT data inputs of a logic cell.
pub const DATA_INPUTS: [Ident; 4] = [I0, I1, I2, I3];

/// The flip-flop control ports shared by every sequential cell in a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPort {
    /// Clock enable.
    Cen,
    /// Clock.
    Clk,
    /// Set/reset.
    Sr,
}

impl ControlPort {
    /// All control ports, in comparison order.
    pub const ALL: [ControlPort; 3] = [ControlPort::Cen, ControlPort::Clk, ControlPort::Sr];

    /// Returns the port name.
    pub fn name(self) -> Ident {
        match self {
            ControlPort::Cen => CEN,
            ControlPort::Clk => CLK,
            ControlPort::Sr => SR,
        }
    }
}

impl fmt::Display for ControlPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ControlPort::Cen => "CEN",
            ControlPort::Clk => "CLK",
            ControlPort::Sr => "SR",
        })
    }
}

/// The control nets of one cell. `None` means the port is absent or
/// unconnected, and compares equal only to another `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlNets {
    /// Net on `CEN`.
    pub cen: Option<NetId>,
    /// Net on `CLK`.
    pub clk: Option<NetId>,
    /// Net on `SR`.
    pub sr: Option<NetId>,
}

impl ControlNets {
    /// Resolves the control nets of `cell`.
    pub fn of(netlist: &Netlist, cell: CellId) -> Self {
        let net = |port: ControlPort| netlist.net_of(cell, port.name());
        Self {
            cen: net(ControlPort::Cen),
            clk: net(ControlPort::Clk),
            sr: net(ControlPort::Sr),
        }
    }

    /// Returns the net on one control port.
    pub fn get(&self, port: ControlPort) -> Option<NetId> {
        match port {
            ControlPort::Cen => self.cen,
            ControlPort::Clk => self.clk,
            ControlPort::Sr => self.sr,
        }
    }

    /// Returns the first port on which `self` and `other` differ.
    pub fn first_mismatch(&self, other: &ControlNets) -> Option<ControlPort> {
        ControlPort::ALL
            .into_iter()
            .find(|&port| self.get(port) != other.get(port))
    }
}
