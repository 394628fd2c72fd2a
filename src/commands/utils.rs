use anyhow::Result;
use std::path::Path;
use tracing::warn;

use crate::export;
use crate::stats::Summary;
use crate::types::{GigRecord, OutputFormat};

/// Write the primary CSV (plus its TSV mirror) and the optional JSON
/// export. CSV/JSON failures are fatal; the TSV mirror only warns.
pub fn export_records(
    records: &mut [GigRecord],
    csv_path: &Path,
    json_path: Option<&Path>,
) -> Result<()> {
    if records.is_empty() {
        warn!("No records to export");
        return Ok(());
    }

    export::write_csv(records, csv_path)?;
    export::write_tsv(records, &csv_path.with_extension("tsv"));

    if let Some(json_path) = json_path {
        export::write_json(records, json_path)?;
    }
    Ok(())
}

/// End-of-run report on stdout, in the requested format.
pub fn print_summary(records: &[GigRecord], format: OutputFormat) -> Result<()> {
    let summary = Summary::from_records(records);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Simple => print!("{}", summary.render_text()),
    }
    Ok(())
}
