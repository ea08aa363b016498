//! List command: print the indicator catalog.

use anyhow::Result;
use tethys_indices::{Computation, catalog};

/// Print one line per indicator.
pub fn run() -> Result<()> {
    for indicator in catalog() {
        let freq = match indicator.computation() {
            Computation::Resampling { freq } => freq.to_string(),
            Computation::Reducing => "whole series".to_string(),
        };
        println!(
            "{:<22} {:<14} {:<10} {}",
            indicator.identifier(),
            freq,
            indicator.units(),
            indicator.title()
        );
    }
    Ok(())
}
