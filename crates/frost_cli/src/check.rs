//! `frost check`: audit a whole placement.
//!
//! 1. Load `frost.toml` and the fabric
//! 2. Load the placed design and resolve it against the fabric
//! 3. Audit every occupied tile
//! 4. Render diagnostics and a summary

use std::path::Path;

use frost_arch::Architecture;
use frost_common::FrostResult;
use frost_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer};
use frost_place::{check_placement, AuditReport, DesignFile, Legality, LegalityRules};

use crate::context::{describe_source, load_fabric, load_settings};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Outcome of auditing one design, before rendering.
struct Audit {
    result: FrostResult<AuditReport>,
    diagnostics: Vec<Diagnostic>,
}

/// Runs the `frost check` command.
///
/// Returns exit code 0 if the placement is legal, and 1 if any tile is
/// illegal or the design breaks a checker precondition.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let audit = audit(args, global)?;

    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in &audit.diagnostics {
                if global.quiet && diag.severity != Severity::Error {
                    continue;
                }
                eprintln!("{}", renderer.render(diag));
            }
            if !global.quiet {
                let warnings = audit
                    .diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Warning)
                    .count();
                match &audit.result {
                    Ok(report) => eprintln!(
                        "   Result: {} of {} tile(s) illegal, {} warning(s)",
                        report.illegal, report.checked, warnings
                    ),
                    Err(_) => eprintln!("   Result: audit aborted on a contract violation"),
                }
            }
        }
        ReportFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json_document(&audit))
                    .unwrap_or_else(|_| "{}".to_string())
            );
        }
    }

    Ok(match &audit.result {
        Ok(report) if report.is_legal() => 0,
        _ => 1,
    })
}

fn audit(args: &CheckArgs, global: &GlobalArgs) -> Result<Audit, Box<dyn std::error::Error>> {
    let (config, base_dir) = load_settings(global)?;
    let fabric = load_fabric(args.fabric.as_deref(), &config, &base_dir)?;
    if global.verbose {
        eprintln!(
            "   Fabric {} ({} sites) from {}",
            fabric.device_name(),
            fabric.site_count(),
            describe_source(args.fabric.as_deref(), &config)
        );
    }

    let (netlist, placement) = DesignFile::load(Path::new(&args.design))?.into_netlist(&fabric)?;
    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "   Checking {} ({} cells, {} placed)",
            args.design,
            netlist.cell_count(),
            placement.len()
        );
    }

    let oracle = Legality::new(&fabric, &netlist, &placement)
        .with_rules(LegalityRules::from(&config.legality));
    let sink = DiagnosticSink::new();
    let result = check_placement(&oracle, &config.report, &sink);
    Ok(Audit {
        result,
        diagnostics: sink.take_all(),
    })
}

fn json_document(audit: &Audit) -> serde_json::Value {
    match &audit.result {
        Ok(report) => serde_json::json!({
            "report": report,
            "diagnostics": audit.diagnostics,
        }),
        Err(violation) => serde_json::json!({
            "error": violation.to_string(),
            "diagnostics": audit.diagnostics,
        }),
    }
}
