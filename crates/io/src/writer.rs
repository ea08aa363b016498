//! JSON report writer configuration and orchestration.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::IoError;
use crate::report::Report;

/// Configuration for writing reports.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Indent the JSON output.
    pretty: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl WriterConfig {
    /// Enable or disable indented output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns whether output is indented.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

/// Write `report` as JSON to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file cannot be created or written and
/// [`IoError::Json`] if serialization fails.
pub fn write_report(path: &Path, report: &Report, config: &WriterConfig) -> Result<(), IoError> {
    let write_err = |e: std::io::Error| IoError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    if config.pretty {
        serde_json::to_writer_pretty(&mut out, report)?;
    } else {
        serde_json::to_writer(&mut out, report)?;
    }
    out.write_all(b"\n").map_err(write_err)?;
    out.flush().map_err(write_err)?;

    info!(
        path = %path.display(),
        variables = report.variables.len(),
        "report written"
    );
    Ok(())
}

/// Read a report previously written by [`write_report`].
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::Read`] or [`IoError::Json`].
pub fn read_report(path: &Path) -> Result<Report, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| IoError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(serde_json::from_str(&text)?)
}
