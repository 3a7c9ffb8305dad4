//! Whole-placement audit.
//!
//! Checks every occupied tile of a placement once, in parallel, and reports
//! each illegal tile or site as a diagnostic.

use crate::classify::{is_clock_port, is_global};
use crate::ids::CellId;
use crate::legality::{Legality, Rejection, Verdict};
use crate::netlist::CellKind;
use frost_arch::{SiteId, SiteType};
use frost_common::{ContractViolation, FrostResult};
use frost_config::ReportConfig;
use frost_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink, Label};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

/// Illegal logic tile.
pub const ILLEGAL_LOGIC_TILE: DiagnosticCode = DiagnosticCode::new(Category::Legality, 301);
/// IO cell on a site without a package pin.
pub const IO_WITHOUT_PIN: DiagnosticCode = DiagnosticCode::new(Category::Legality, 302);
/// Global buffer on a network it cannot drive.
pub const ILLEGAL_GLOBAL_BUFFER: DiagnosticCode = DiagnosticCode::new(Category::Legality, 303);
/// Netlist and fabric break a checker precondition.
pub const CONTRACT_VIOLATION: DiagnosticCode = DiagnosticCode::new(Category::Contract, 300);
/// IO cell whose clock interaction was not checked.
pub const UNCHECKED_IO_CLOCK: DiagnosticCode = DiagnosticCode::new(Category::Advisory, 310);

/// One illegal tile or site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Tile name for logic tiles, site name otherwise.
    pub subject: String,
    /// Names of the cells involved.
    pub cells: Vec<String>,
    /// Why the placement is illegal.
    pub reason: String,
}

/// Summary of an audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Tiles and sites checked.
    pub checked: usize,
    /// Tiles and sites found illegal.
    pub illegal: usize,
    /// The illegal tiles and sites, in site order.
    pub findings: Vec<Finding>,
}

impl AuditReport {
    /// Returns whether every checked tile and site was legal.
    pub fn is_legal(&self) -> bool {
        self.illegal == 0
    }
}

struct Outcome {
    site: SiteId,
    cells: Vec<CellId>,
    rejection: Rejection,
}

/// Audits every occupied tile of the oracle's placement.
///
/// Logic tiles are checked as a whole, other sites one by one. Tentative
/// bindings are ignored.
///
/// # Errors
///
/// If any tile or site breaks a checker precondition, each such unit gets a
/// [`CONTRACT_VIOLATION`] diagnostic and the violation of the lowest-numbered
/// site is returned. Findings for the other units are still emitted.
pub fn check_placement(
    legality: &Legality<'_>,
    report: &ReportConfig,
    sink: &DiagnosticSink,
) -> FrostResult<AuditReport> {
    let units = audit_units(legality);

    let results: Vec<FrostResult<Option<Outcome>>> = units
        .par_iter()
        .map_init(
            || legality.scratch(),
            |scratch, &site| -> FrostResult<Option<Outcome>> {
                match legality.site_verdict(site, scratch)? {
                    Verdict::Legal => Ok(None),
                    Verdict::Illegal(rejection) => {
                        let cells = match legality.arch().site_type(site) {
                            SiteType::Logic => scratch.cells().to_vec(),
                            _ => legality.placement().occupant_of(site, false).into_iter().collect(),
                        };
                        Ok(Some(Outcome {
                            site,
                            cells,
                            rejection,
                        }))
                    }
                }
            },
        )
        .collect();

    let mut audit = AuditReport {
        checked: units.len(),
        ..AuditReport::default()
    };
    let mut first_violation = None;
    for (&site, result) in units.iter().zip(results) {
        match result {
            Ok(None) => {}
            Ok(Some(outcome)) => {
                let finding = describe(legality, &outcome);
                sink.emit(diagnostic(legality, &outcome, &finding));
                audit.findings.push(finding);
            }
            Err(violation) => {
                sink.emit(contract_diagnostic(legality, site, &violation));
                first_violation.get_or_insert(violation);
            }
        }
    }
    audit.illegal = audit.findings.len();
    if let Some(violation) = first_violation {
        return Err(violation);
    }

    if report.warn_unchecked_io_clocks {
        warn_unchecked_io_clocks(legality, sink);
    }
    Ok(audit)
}

/// One representative site per occupied logic tile, plus every other
/// occupied site.
fn audit_units(legality: &Legality<'_>) -> Vec<SiteId> {
    let arch = legality.arch();
    let placement = legality.placement();
    let mut seen_tiles = HashSet::new();
    placement
        .occupied_sites()
        .into_iter()
        .filter(|&site| placement.occupant_of(site, false).is_some())
        .filter(|&site| {
            arch.site_type(site) != SiteType::Logic || seen_tiles.insert(arch.tile_of(site))
        })
        .collect()
}

fn describe(legality: &Legality<'_>, outcome: &Outcome) -> Finding {
    let arch = legality.arch();
    let subject = match arch.site_type(outcome.site) {
        SiteType::Logic => arch.site_location(outcome.site).to_string(),
        _ => arch.site_name(outcome.site).to_string(),
    };
    let cells = outcome
        .cells
        .iter()
        .map(|&cell| legality.netlist().cell(cell).name.clone())
        .collect();
    Finding {
        subject,
        cells,
        reason: outcome.rejection.to_string(),
    }
}

fn diagnostic(legality: &Legality<'_>, outcome: &Outcome, finding: &Finding) -> Diagnostic {
    let netlist = legality.netlist();
    let arch = legality.arch();
    let site_of = |cell: CellId| {
        legality
            .placement()
            .site_of(cell)
            .map(|site| arch.site_name(site).to_string())
            .unwrap_or_default()
    };

    match outcome.rejection {
        Rejection::ControlNetMismatch { cell, .. } | Rejection::ClockPolarityMismatch { cell } => {
            let mut diag = Diagnostic::error(
                ILLEGAL_LOGIC_TILE,
                format!("logic tile {} mixes flip-flop control sets", finding.subject),
                finding.subject.clone(),
            )
            .with_label(Label::primary(site_of(cell), format!(
                "'{}': {}",
                netlist.cell(cell).name,
                finding.reason
            )));
            for &other in outcome.cells.iter().filter(|&&c| c != cell) {
                diag = diag.with_label(Label::secondary(
                    site_of(other),
                    format!("'{}'", netlist.cell(other).name),
                ));
            }
            diag.with_help("move flip-flops with different clock, enable or reset nets to separate tiles")
        }
        Rejection::LocalInputBudget { .. } => Diagnostic::error(
            ILLEGAL_LOGIC_TILE,
            format!("logic tile {} has too many local inputs", finding.subject),
            finding.subject.clone(),
        )
        .with_note(finding.reason.clone())
        .with_note(format!("cells in tile: {}", finding.cells.join(", "))),
        Rejection::NoPackagePin => Diagnostic::error(
            IO_WITHOUT_PIN,
            format!("IO cell '{}' is on an unbonded site", finding.cells.join(", ")),
            finding.subject.clone(),
        )
        .with_label(Label::primary(finding.subject.clone(), finding.reason.clone())),
        Rejection::GlobalBufferMixedConsumers | Rejection::GlobalBufferParity { .. } => {
            Diagnostic::error(
                ILLEGAL_GLOBAL_BUFFER,
                format!("global buffer '{}' cannot drive this network", finding.cells.join(", ")),
                finding.subject.clone(),
            )
            .with_label(Label::primary(finding.subject.clone(), finding.reason.clone()))
        }
    }
}

/// Names the unit's subject and labels every occupied site in it.
fn contract_diagnostic(
    legality: &Legality<'_>,
    site: SiteId,
    violation: &ContractViolation,
) -> Diagnostic {
    let arch = legality.arch();
    let placement = legality.placement();
    let netlist = legality.netlist();
    let (subject, sites) = match arch.site_type(site) {
        SiteType::Logic => (
            arch.site_location(site).to_string(),
            arch.co_resident_sites(site).to_vec(),
        ),
        _ => (arch.site_name(site).to_string(), vec![site]),
    };

    let mut diag = Diagnostic::error(
        CONTRACT_VIOLATION,
        format!("cannot check {subject}: {}", violation.message),
        subject,
    );
    for occupied in sites {
        if let Some(cell) = placement.occupant_of(occupied, false) {
            let data = netlist.cell(cell);
            diag = diag.with_label(Label::primary(
                arch.site_name(occupied),
                format!("'{}' ({})", data.name, data.kind),
            ));
        }
    }
    diag.with_help("fix the netlist or fabric description; no verdict is given for this unit")
}

fn warn_unchecked_io_clocks(legality: &Legality<'_>, sink: &DiagnosticSink) {
    let netlist = legality.netlist();
    let placement = legality.placement();
    for site in placement.occupied_sites() {
        let Some(cell) = placement.occupant_of(site, false) else {
            continue;
        };
        let data = netlist.cell(cell);
        if data.kind != CellKind::Io {
            continue;
        }
        let clocked = data.ports.iter().filter_map(|port| port.net).any(|net| {
            is_global(netlist, net)
                || netlist.users_of(net).iter().any(|&user| is_clock_port(netlist, user))
        });
        if clocked {
            sink.emit(
                Diagnostic::warning(
                    UNCHECKED_IO_CLOCK,
                    format!("clock interaction of IO cell '{}' was not checked", data.name),
                    legality.arch().site_name(site),
                )
                .with_note("only the package pin of IO sites is verified"),
            );
        }
    }
}
