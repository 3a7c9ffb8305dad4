//! `frost probe`: ask whether one cell may be placed at one site.

use std::path::Path;

use frost_arch::Architecture;
use frost_place::{DesignFile, Legality, LegalityRules};

use crate::context::{load_fabric, load_settings};
use crate::{GlobalArgs, ProbeArgs, ReportFormat};

/// Runs the `frost probe` command.
///
/// Returns exit code 0 if the binding would be legal, 1 otherwise.
pub fn run(args: &ProbeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (config, base_dir) = load_settings(global)?;
    let fabric = load_fabric(args.fabric.as_deref(), &config, &base_dir)?;
    let (netlist, placement) = DesignFile::load(Path::new(&args.design))?.into_netlist(&fabric)?;

    let cell = netlist
        .cell_by_name(&args.cell)
        .ok_or_else(|| format!("design has no cell '{}'", args.cell))?;
    let site = fabric
        .site_by_name(&args.site)
        .ok_or_else(|| format!("fabric has no site '{}'", args.site))?;

    let oracle = Legality::new(&fabric, &netlist, &placement)
        .with_rules(LegalityRules::from(&config.legality));
    let mut scratch = oracle.scratch();
    let verdict = oracle.cell_verdict(cell, site, &mut scratch)?;
    let reason = verdict.rejection().map(|r| r.to_string());

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                match reason {
                    None => println!("{} at {}: legal", args.cell, args.site),
                    Some(ref reason) => println!("{} at {}: illegal, {reason}", args.cell, args.site),
                }
            }
        }
        ReportFormat::Json => {
            let json = serde_json::json!({
                "cell": args.cell,
                "site": args.site,
                "legal": verdict.is_legal(),
                "reason": reason,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
            );
        }
    }

    Ok(if verdict.is_legal() { 0 } else { 1 })
}
