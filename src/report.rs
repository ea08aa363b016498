//! Assembly of JSON reports from validation results.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use tethys_calendar::Calendar;
use tethys_checks::{CheckConfig, PeriodCoverage, Resampled, WholeSeries};
use tethys_indices::IndicatorOutput;
use tethys_io::{PeriodReport, Report, VariableReport};

use crate::cli::IoArgs;
use crate::config::IoConfig;

/// Input and output paths, CLI flags taking precedence over the config.
pub fn resolve_paths(args: &IoArgs, io: &IoConfig) -> Result<(PathBuf, PathBuf)> {
    let input = args
        .input
        .clone()
        .or_else(|| io.input.clone())
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))?;
    let output = args
        .output
        .clone()
        .or_else(|| io.output.clone())
        .ok_or_else(|| anyhow!("no output path: set [io].output in config or use --output"))?;
    Ok((input, output))
}

/// Report header for a run.
pub fn new_report(calendar: Calendar, config: &CheckConfig, variables: Vec<VariableReport>) -> Report {
    Report {
        calendar: calendar.cf_name().to_string(),
        base_freq: config.base().to_string(),
        target_freq: config.target().to_string(),
        policy: config.policy().name().to_string(),
        boundary: config.boundary().name().to_string(),
        variables,
    }
}

/// Coverage-only periods: verdicts without values.
pub fn mask_periods(coverage: &[PeriodCoverage], missing: &[bool]) -> Vec<PeriodReport> {
    coverage
        .iter()
        .zip(missing)
        .map(|(c, &m)| PeriodReport::from_coverage(c, m, None))
        .collect()
}

/// Periods of an indicator result.
pub fn output_periods(output: &IndicatorOutput) -> Vec<PeriodReport> {
    match output {
        IndicatorOutput::Periods(resampled) => resampled_periods(resampled),
        IndicatorOutput::Whole(whole) => vec![whole_period(whole)],
    }
}

fn resampled_periods(resampled: &Resampled) -> Vec<PeriodReport> {
    resampled
        .coverage()
        .iter()
        .zip(resampled.values())
        .zip(resampled.missing())
        .map(|((c, &v), &m)| PeriodReport::from_coverage(c, m, Some(v)))
        .collect()
}

fn whole_period(whole: &WholeSeries) -> PeriodReport {
    PeriodReport::from_coverage(&whole.coverage, whole.missing, Some(whole.value))
}

#[cfg(test)]
mod tests {
    use tethys_calendar::{DateTime, Frequency};
    use tethys_checks::{TimeSeries, Validator};

    use super::*;

    #[test]
    fn cli_paths_override_config() {
        let args = IoArgs {
            config: PathBuf::from("tethys.toml"),
            input: Some(PathBuf::from("cli.json")),
            output: None,
        };
        let io = IoConfig {
            input: Some(PathBuf::from("config.json")),
            output: Some(PathBuf::from("out.json")),
            ..IoConfig::default()
        };
        let (input, output) = resolve_paths(&args, &io).unwrap();
        assert_eq!(input, PathBuf::from("cli.json"));
        assert_eq!(output, PathBuf::from("out.json"));

        let err = resolve_paths(&args, &IoConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no output path"));
    }

    #[test]
    fn mask_report_has_no_values() {
        let cal = Calendar::NoLeap;
        let start = DateTime::date(cal, 2001, 1, 1).unwrap();
        let series = TimeSeries::regular(cal, start, &Frequency::DAILY, vec![1.0; 40]);
        let config = CheckConfig::new(Frequency::DAILY, Frequency::MONTH_START);
        let validator = Validator::new(config.clone()).unwrap();
        let coverage = validator.coverage(&series).unwrap();
        let missing = validator.missing_mask(&series).unwrap();

        let periods = mask_periods(&coverage, &missing);
        assert_eq!(periods.len(), 2);
        assert!(!periods[0].missing);
        assert!(periods[1].missing);
        assert!(periods.iter().all(|p| p.value.is_none()));

        let report = new_report(cal, &config, vec![VariableReport::new("q", periods)]);
        assert_eq!(report.calendar, "noleap");
        assert_eq!(report.target_freq, "MS");
        assert_eq!(report.variables[0].masked, 1);
    }
}
