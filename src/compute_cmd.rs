//! Compute command: run one indicator over every variable.

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, info_span};

use tethys_indices::lookup;
use tethys_io::{VariableReport, read_json, write_report};

use crate::cli::ComputeArgs;
use crate::config::TethysConfig;
use crate::{convert, report};

/// Run the indicator pipeline.
pub fn run(args: ComputeArgs) -> Result<()> {
    let _cmd = info_span!("compute", indicator = %args.indicator).entered();
    let config = TethysConfig::load(&args.io.config)?;
    let (input, output) = report::resolve_paths(&args.io, &config.io)?;

    let indicator = lookup(&args.indicator)?;
    let fallback = *indicator.check_config(None).target();
    let target = match &args.freq {
        Some(alias) => convert::parse_frequency(alias, "target_freq")?,
        None => convert::resolve_target(&config.check, fallback)?,
    };
    let check_cfg = convert::build_check_config(&config.check, target)?;
    let compliance = convert::parse_compliance(&config.check.cf_compliance)?;
    let reader_cfg = convert::build_reader_config(&config.io)?;
    let writer_cfg = convert::build_writer_config(&config.io);

    info!(path = %input.display(), "reading dataset");
    let dataset = read_json(&input, &reader_cfg)
        .with_context(|| format!("failed to read dataset: {}", input.display()))?;

    let names: Vec<&str> = dataset.names().collect();
    let variables = names
        .par_iter()
        .map(|&name| -> Result<VariableReport> {
            let _span = info_span!("variable", variable = name).entered();
            let series = dataset.series(name)?;
            let attrs = dataset.variable(name)?.attrs();
            let out = indicator
                .compute(&series, attrs, &check_cfg, compliance)
                .with_context(|| format!("{} failed for variable '{name}'", indicator.identifier()))?;
            let var = VariableReport::new(name, report::output_periods(&out))
                .with_indicator(indicator.identifier(), indicator.units());
            info!(periods = var.periods.len(), masked = var.masked, "indicator computed");
            Ok(var)
        })
        .collect::<Result<Vec<_>>>()?;

    let report = report::new_report(dataset.calendar(), &check_cfg, variables);
    write_report(&output, &report, &writer_cfg)
        .with_context(|| format!("failed to write report: {}", output.display()))?;
    Ok(())
}
