//! Global buffer placement.
//!
//! Even global networks can carry resets and odd ones clock enables, so the
//! consumers of a buffer's output decide which networks it may drive.

use super::{Parity, Rejection, Verdict};
use crate::classify::{is_enable_port, is_reset_port};
use crate::constids::GLOBAL_BUFFER_OUTPUT;
use crate::ids::CellId;
use crate::netlist::Netlist;
use frost_arch::{Architecture, SiteId};
use frost_common::{ContractViolation, FrostResult};

pub(super) fn check_global_buffer(
    arch: &dyn Architecture,
    netlist: &Netlist,
    cell: CellId,
    site: SiteId,
) -> FrostResult<Verdict> {
    let net = netlist.net_of(cell, GLOBAL_BUFFER_OUTPUT).ok_or_else(|| {
        ContractViolation::new(format!(
            "global buffer '{}' has no net on GLOBAL_BUFFER_OUTPUT (site '{}')",
            netlist.cell(cell).name,
            arch.site_name(site)
        ))
    })?;
    let index = arch.global_network_index(site)?;

    let mut drives_reset = false;
    let mut drives_enable = false;
    for &user in netlist.users_of(net) {
        drives_reset |= is_reset_port(netlist, user);
        drives_enable |= is_enable_port(netlist, user);
    }

    let required = match (drives_reset, drives_enable) {
        (true, true) => return Ok(Verdict::Illegal(Rejection::GlobalBufferMixedConsumers)),
        (true, false) => Parity::Even,
        (false, true) => Parity::Odd,
        (false, false) => return Ok(Verdict::Legal),
    };

    if required.matches(index) {
        Ok(Verdict::Legal)
    } else {
        Ok(Verdict::Illegal(Rejection::GlobalBufferParity { index, required }))
    }
}
