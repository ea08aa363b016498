//! Mask command: coverage and missingness verdicts for every variable.

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, info_span};

use tethys_calendar::Frequency;
use tethys_checks::Validator;
use tethys_io::{VariableReport, read_json, write_report};

use crate::cli::MaskArgs;
use crate::config::TethysConfig;
use crate::{convert, report};

/// Run the coverage-only pipeline.
pub fn run(args: MaskArgs) -> Result<()> {
    let _cmd = info_span!("mask").entered();
    let config = TethysConfig::load(&args.io.config)?;
    let (input, output) = report::resolve_paths(&args.io, &config.io)?;

    let reader_cfg = convert::build_reader_config(&config.io)?;
    let writer_cfg = convert::build_writer_config(&config.io);
    let target = convert::resolve_target(&config.check, Frequency::YEAR_START)?;
    let check_cfg = convert::build_check_config(&config.check, target)?;
    let validator = Validator::new(check_cfg.clone()).context("invalid check configuration")?;

    info!(path = %input.display(), "reading dataset");
    let dataset = read_json(&input, &reader_cfg)
        .with_context(|| format!("failed to read dataset: {}", input.display()))?;

    let names: Vec<&str> = dataset.names().collect();
    let variables = names
        .par_iter()
        .map(|&name| -> Result<VariableReport> {
            let _span = info_span!("variable", variable = name).entered();
            let series = dataset.series(name)?;
            let coverage = validator
                .coverage(&series)
                .with_context(|| format!("variable '{name}' failed validation"))?;
            let missing: Vec<bool> = coverage
                .iter()
                .map(|c| check_cfg.policy().is_missing(c))
                .collect();
            let periods = report::mask_periods(&coverage, &missing);
            let var = VariableReport::new(name, periods);
            info!(periods = var.periods.len(), masked = var.masked, "variable checked");
            Ok(var)
        })
        .collect::<Result<Vec<_>>>()?;

    let report = report::new_report(dataset.calendar(), &check_cfg, variables);
    write_report(&output, &report, &writer_cfg)
        .with_context(|| format!("failed to write report: {}", output.display()))?;
    Ok(())
}
