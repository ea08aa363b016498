use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Tethys configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TethysConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Coverage-check settings.
    #[serde(default)]
    pub check: CheckToml,
}

impl TethysConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub variables: Option<Vec<String>>,
    #[serde(default = "default_calendar")]
    pub default_calendar: String,
    #[serde(default = "default_true")]
    pub mask_fill_values: bool,
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            variables: None,
            default_calendar: default_calendar(),
            mask_fill_values: true,
            pretty: true,
        }
    }
}

fn default_calendar() -> String {
    "standard".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckToml {
    #[serde(default = "default_base_freq")]
    pub base_freq: String,
    /// Falls back to the indicator frequency for `compute`, `YS` for `mask`.
    #[serde(default)]
    pub target_freq: Option<String>,
    #[serde(default = "default_boundary")]
    pub boundary: String,
    #[serde(default = "default_min_records")]
    pub min_records: usize,
    #[serde(default = "default_cf_compliance")]
    pub cf_compliance: String,
    #[serde(default)]
    pub policy: PolicyToml,
}

impl Default for CheckToml {
    fn default() -> Self {
        Self {
            base_freq: default_base_freq(),
            target_freq: None,
            boundary: default_boundary(),
            min_records: default_min_records(),
            cf_compliance: default_cf_compliance(),
            policy: PolicyToml::default(),
        }
    }
}

fn default_base_freq() -> String {
    "D".to_string()
}
fn default_boundary() -> String {
    "full".to_string()
}
fn default_min_records() -> usize {
    1
}
fn default_cf_compliance() -> String {
    "raise".to_string()
}

/// Missingness policy: a name plus the options that policy takes.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyToml {
    #[serde(default = "default_policy")]
    pub name: String,
    pub tolerance: Option<f64>,
    pub n: Option<usize>,
    pub max_missing_fraction: Option<f64>,
    pub max_consecutive: Option<usize>,
}

impl Default for PolicyToml {
    fn default() -> Self {
        Self {
            name: default_policy(),
            tolerance: None,
            n: None,
            max_missing_fraction: None,
            max_consecutive: None,
        }
    }
}

fn default_policy() -> String {
    "any".to_string()
}
