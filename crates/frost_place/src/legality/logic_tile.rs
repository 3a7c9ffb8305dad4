//! Shared-resource check for the logic cells of one tile.
//!
//! A logic tile has one control bus (clock, clock enable, set/reset, clock
//! polarity) shared by all its flip-flops, and a local routing crossbar with
//! a fixed number of distinct input nets. Nets on global networks bypass the
//! crossbar and are not counted.

use super::ports::{ControlNets, DATA_INPUTS};
use super::{Rejection, Verdict};
use crate::classify::is_global;
use crate::constids::{DFF_ENABLE, NEG_CLK};
use crate::ids::{CellId, NetId};
use crate::netlist::{CellKind, Netlist};
use crate::rules::LegalityRules;
use frost_common::{ContractViolation, FrostResult};
use std::collections::HashSet;

struct Reference {
    nets: ControlNets,
    neg_clk: bool,
}

pub(super) fn check_logic_cells(
    netlist: &Netlist,
    rules: &LegalityRules,
    cells: &[CellId],
    locals: &mut HashSet<NetId>,
) -> FrostResult<Verdict> {
    locals.clear();
    let mut reference: Option<Reference> = None;

    for &cell in cells {
        let data = netlist.cell(cell);
        if data.kind != CellKind::Logic {
            return Err(ContractViolation::new(format!(
                "cell '{}' ({}) occupies a logic tile",
                data.name, data.kind
            )));
        }

        if netlist.bool_param(cell, DFF_ENABLE, false)? {
            let nets = ControlNets::of(netlist, cell);
            let neg_clk = netlist.bool_param(cell, NEG_CLK, false)?;
            match &reference {
                None => {
                    for net in [nets.cen, nets.clk, nets.sr].into_iter().flatten() {
                        if !is_global(netlist, net) {
                            locals.insert(net);
                        }
                    }
                    reference = Some(Reference { nets, neg_clk });
                }
                Some(first) => {
                    if let Some(port) = first.nets.first_mismatch(&nets) {
                        return Ok(Verdict::Illegal(Rejection::ControlNetMismatch { cell, port }));
                    }
                    if first.neg_clk != neg_clk {
                        return Ok(Verdict::Illegal(Rejection::ClockPolarityMismatch { cell }));
                    }
                }
            }
        }

        for port in DATA_INPUTS {
            if let Some(net) = netlist.net_of(cell, port) {
                if !is_global(netlist, net) {
                    locals.insert(net);
                }
            }
        }
    }

    let used = locals.len();
    if used > rules.local_input_budget {
        Ok(Verdict::Illegal(Rejection::LocalInputBudget {
            used,
            budget: rules.local_input_budget,
        }))
    } else {
        Ok(Verdict::Legal)
    }
}
