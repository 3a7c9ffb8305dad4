//! Frost CLI: placement legality checks for iCE40-class fabrics.
//!
//! Provides `frost check` to audit a placed design against a fabric and
//! `frost probe` to ask whether one cell may sit at one site.

#![warn(missing_docs)]

mod check;
mod context;
mod probe;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Frost: placement legality checker.
#[derive(Parser, Debug)]
#[command(name = "frost", version, about = "Frost placement legality checker")]
pub struct Cli {
    /// Print only error diagnostics.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Report the fabric and rule set in use.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to color diagnostic headers.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `frost.toml` file or the directory containing it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// What to check.
    #[command(subcommand)]
    pub command: Command,
}

/// Frost subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Audit every occupied tile of a placed design.
    Check(CheckArgs),
    /// Ask whether a cell may be placed at a site.
    Probe(ProbeArgs),
}

/// Arguments for the `frost check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Placed design (JSON).
    pub design: String,

    /// Fabric description (JSON); overrides the configured fabric.
    #[arg(long)]
    pub fabric: Option<String>,

    /// Output format for the report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `frost probe` subcommand.
#[derive(Parser, Debug)]
pub struct ProbeArgs {
    /// Placed design (JSON).
    pub design: String,

    /// Name of the cell to place.
    #[arg(long)]
    pub cell: String,

    /// Name of the candidate site.
    #[arg(long)]
    pub site: String,

    /// Fabric description (JSON); overrides the configured fabric.
    #[arg(long)]
    pub fabric: Option<String>,

    /// Output format for the answer.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Color mode for `--color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color unless `TERM` is unset or `dumb`.
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text for a terminal.
    Text,
    /// One JSON document on stdout.
    Json,
}

/// Flags shared by every subcommand, with `--color` resolved.
pub struct GlobalArgs {
    /// `--quiet` was given.
    pub quiet: bool,
    /// `--verbose` was given.
    pub verbose: bool,
    /// Resolved `--color`.
    pub color: bool,
    /// Optional path to a config file or its directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::env::var("TERM").is_ok_and(|term| term != "dumb"),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global),
        Command::Probe(ref args) => probe::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
