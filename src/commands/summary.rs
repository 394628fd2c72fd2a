use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;

use crate::commands::utils;
use crate::types::{GigRecord, OutputFormat};

/// Recompute aggregates from a prior JSON export.
pub async fn handle_summary(input: PathBuf, format: OutputFormat) -> Result<()> {
    let file = File::open(&input)
        .with_context(|| format!("Cannot open export file {}", input.display()))?;
    let records: Vec<GigRecord> = serde_json::from_reader(file)
        .with_context(|| format!("Cannot parse export file {}", input.display()))?;

    utils::print_summary(&records, format)
}
