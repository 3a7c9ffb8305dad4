//! Net and port classification predicates.

use crate::constids::{CEN, CLK, GLOBAL_BUFFER_OUTPUT, RCLK, SR, WCLK};
use crate::ids::NetId;
use crate::netlist::{CellKind, Netlist, PortRef};

/// Returns whether `net` runs on a global network, i.e. is driven by a
/// global buffer's output.
pub fn is_global(netlist: &Netlist, net: NetId) -> bool {
    netlist.driver_of(net).is_some_and(|driver| {
        driver.port == GLOBAL_BUFFER_OUTPUT
            && netlist.cell(driver.cell).kind == CellKind::GlobalBuffer
    })
}

/// Returns whether `port` is a flip-flop reset input.
pub fn is_reset_port(netlist: &Netlist, port: PortRef) -> bool {
    netlist.cell(port.cell).kind == CellKind::Logic && port.port == SR
}

/// Returns whether `port` is a flip-flop clock-enable input.
pub fn is_enable_port(netlist: &Netlist, port: PortRef) -> bool {
    netlist.cell(port.cell).kind == CellKind::Logic && port.port == CEN
}

/// Returns whether `port` is a clock input.
pub fn is_clock_port(netlist: &Netlist, port: PortRef) -> bool {
    match netlist.cell(port.cell).kind {
        CellKind::Logic => port.port == CLK,
        CellKind::Ram => port.port == RCLK || port.port == WCLK,
        CellKind::Io | CellKind::GlobalBuffer | CellKind::Pll => false,
    }
}
