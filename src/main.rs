mod cli;
mod compute_cmd;
mod config;
mod convert;
mod list_cmd;
mod logging;
mod mask_cmd;
mod report;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Mask(args) => mask_cmd::run(args),
        Command::Compute(args) => compute_cmd::run(args),
        Command::List => list_cmd::run(),
    }
}
