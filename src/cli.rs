use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tethys temporal-coverage validation for climate and hydrology indicators.
#[derive(Parser)]
#[command(
    name = "tethys",
    version,
    about = "Temporal-coverage validation for climate and hydrology indicators"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate every variable and report per-period coverage and masks.
    Mask(MaskArgs),
    /// Compute an indicator for every variable, masking incomplete periods.
    Compute(ComputeArgs),
    /// List the available indicators.
    List,
}

/// Input and output overrides shared by `mask` and `compute`.
#[derive(clap::Args)]
pub struct IoArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "tethys.toml")]
    pub config: PathBuf,

    /// Override input JSON dataset path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output JSON report path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `mask` subcommand.
#[derive(clap::Args)]
pub struct MaskArgs {
    #[command(flatten)]
    pub io: IoArgs,
}

/// Arguments for the `compute` subcommand.
#[derive(clap::Args)]
pub struct ComputeArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Indicator identifier (see `tethys list`).
    #[arg(long)]
    pub indicator: String,

    /// Override target frequency, e.g. `YS-OCT` or `MS`.
    #[arg(long)]
    pub freq: Option<String>,
}
