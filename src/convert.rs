//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result};

use crate::config::*;

use tethys_calendar::{Calendar, Frequency};
use tethys_checks::{BoundaryMode, CheckConfig, MissingPolicy, PolicyOptions};
use tethys_indices::Compliance;
use tethys_io::{ReaderConfig, WriterConfig};

/// Parses a frequency alias, naming the config key in the error.
pub fn parse_frequency(alias: &str, key: &str) -> Result<Frequency> {
    alias
        .parse()
        .with_context(|| format!("invalid [check].{key}"))
}

/// Builds a [`MissingPolicy`] from the TOML policy table.
pub fn build_policy(policy: &PolicyToml) -> Result<MissingPolicy> {
    let opts = PolicyOptions {
        tolerance: policy.tolerance,
        n: policy.n,
        max_missing_fraction: policy.max_missing_fraction,
        max_consecutive: policy.max_consecutive,
    };
    MissingPolicy::from_name(&policy.name, opts).context("invalid [check.policy]")
}

/// Builds a [`CheckConfig`] from the TOML check configuration.
///
/// `target` is the target frequency resolved by the caller.
pub fn build_check_config(check: &CheckToml, target: Frequency) -> Result<CheckConfig> {
    let base = parse_frequency(&check.base_freq, "base_freq")?;
    let boundary: BoundaryMode = check
        .boundary
        .parse()
        .context("invalid [check].boundary")?;
    let config = CheckConfig::new(base, target)
        .with_policy(build_policy(&check.policy)?)
        .with_boundary(boundary)
        .with_min_records(check.min_records);
    config.validate().context("invalid [check] configuration")?;
    Ok(config)
}

/// Target frequency from config, or `fallback` when none is set.
pub fn resolve_target(check: &CheckToml, fallback: Frequency) -> Result<Frequency> {
    match &check.target_freq {
        Some(alias) => parse_frequency(alias, "target_freq"),
        None => Ok(fallback),
    }
}

/// Parses the CF compliance mode (`raise` or `warn`).
pub fn parse_compliance(s: &str) -> Result<Compliance> {
    s.parse().context("invalid [check].cf_compliance")
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoConfig) -> Result<ReaderConfig> {
    let calendar: Calendar = io
        .default_calendar
        .parse()
        .context("invalid [io].default_calendar")?;
    let mut cfg = ReaderConfig::default()
        .with_default_calendar(calendar)
        .with_mask_fill_values(io.mask_fill_values);
    if let Some(ref names) = io.variables {
        cfg = cfg.with_variables(names.iter().cloned());
    }
    cfg.validate().context("invalid [io] configuration")?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoConfig) -> WriterConfig {
    WriterConfig::default().with_pretty(io.pretty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str) -> CheckToml {
        let config: TethysConfig = toml::from_str(text).unwrap();
        config.check
    }

    #[test]
    fn default_check_config() {
        let cfg = build_check_config(&CheckToml::default(), Frequency::YEAR_START).unwrap();
        assert_eq!(cfg.base(), &Frequency::DAILY);
        assert_eq!(cfg.target(), &Frequency::YEAR_START);
        assert_eq!(cfg.policy(), &MissingPolicy::Any);
        assert_eq!(cfg.boundary(), BoundaryMode::Full);
    }

    #[test]
    fn wmo_policy_and_clipped_boundary() {
        let c = check(
            "[check]\nboundary = \"clip\"\n[check.policy]\nname = \"wmo\"\nmax_consecutive = 3",
        );
        let cfg = build_check_config(&c, Frequency::MONTH_START).unwrap();
        assert_eq!(cfg.boundary(), BoundaryMode::Clipped);
        assert!(matches!(
            cfg.policy(),
            MissingPolicy::Wmo {
                max_consecutive: 3,
                ..
            }
        ));
    }

    #[test]
    fn target_resolution() {
        let c = check("[check]\ntarget_freq = \"QS-DEC\"");
        let target = resolve_target(&c, Frequency::YEAR_START).unwrap();
        assert_eq!(target.to_string(), "QS-DEC");
        let target = resolve_target(&CheckToml::default(), Frequency::MONTH_START).unwrap();
        assert_eq!(target, Frequency::MONTH_START);
    }

    #[test]
    fn rejections() {
        let bad_freq = check("[check]\nbase_freq = \"fortnightly\"");
        let err = build_check_config(&bad_freq, Frequency::YEAR_START).unwrap_err();
        assert!(format!("{err:#}").contains("base_freq"));

        let bad_policy = check("[check.policy]\nname = \"fraction\"");
        assert!(build_check_config(&bad_policy, Frequency::YEAR_START).is_err());

        let stray_option = check("[check.policy]\nname = \"any\"\nn = 3");
        assert!(build_check_config(&stray_option, Frequency::YEAR_START).is_err());

        let bad_boundary = check("[check]\nboundary = \"partial\"");
        assert!(build_check_config(&bad_boundary, Frequency::YEAR_START).is_err());

        let zero = check("[check]\nmin_records = 0");
        assert!(build_check_config(&zero, Frequency::YEAR_START).is_err());

        assert!(parse_compliance("ignore").is_err());
    }

    #[test]
    fn reader_config_from_io() {
        let config: TethysConfig = toml::from_str(
            "[io]\nvariables = [\"q\", \"tas\"]\ndefault_calendar = \"noleap\"\nmask_fill_values = false",
        )
        .unwrap();
        let reader = build_reader_config(&config.io).unwrap();
        assert_eq!(reader.default_calendar(), Calendar::NoLeap);
        assert_eq!(reader.variables().unwrap(), ["q", "tas"]);
        assert!(!reader.mask_fill_values());

        let bad: TethysConfig = toml::from_str("[io]\ndefault_calendar = \"lunar\"").unwrap();
        assert!(build_reader_config(&bad.io).is_err());
    }
}
