//! Row-oriented export of scraped records.
//!
//! CSV and JSON are the primary targets; a tab-separated mirror of the
//! CSV is written best-effort for spreadsheet tools. All writers emit
//! rows in the fixed sort order: rating descending, then completed jobs
//! descending, so unknown (zero) values land last.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

use crate::types::GigRecord;

/// Column headers, in row order
pub const CSV_HEADERS: [&str; 16] = [
    "Title",
    "URL",
    "Freelancer",
    "Rating",
    "Reviews",
    "Price",
    "Delivery Time",
    "Completed Jobs",
    "Category",
    "Keywords",
    "Description",
    "Tags",
    "Seller Level",
    "Online Status",
    "Response Time",
    "Scraped At",
];

/// Sort by rating descending, then completed jobs descending.
pub fn sort_records(records: &mut [GigRecord]) {
    records.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| b.completed_jobs.cmp(&a.completed_jobs))
    });
}

/// Write records as CSV. Rows are sorted before writing.
pub fn write_csv(records: &mut [GigRecord], path: &Path) -> Result<()> {
    sort_records(records);

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("CSV export failed: cannot create {}", path.display()))?;
    write_rows(&mut writer, records)
        .with_context(|| format!("CSV export failed: {}", path.display()))?;

    info!(rows = records.len(), path = %path.display(), "Wrote CSV export");
    Ok(())
}

/// Best-effort tab-separated mirror of the CSV rows. Failure is logged
/// and swallowed; the caller's run is never failed over it.
pub fn write_tsv(records: &mut [GigRecord], path: &Path) {
    sort_records(records);

    let result = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .and_then(|mut writer| write_rows(&mut writer, records));

    match result {
        Ok(()) => info!(rows = records.len(), path = %path.display(), "Wrote TSV mirror"),
        Err(e) => warn!("Skipping TSV mirror {}: {}", path.display(), e),
    }
}

/// Write records as a pretty-printed JSON array. List fields stay
/// arrays; timestamps serialize as RFC 3339. Rows are sorted first.
pub fn write_json(records: &mut [GigRecord], path: &Path) -> Result<()> {
    sort_records(records);

    let file = File::create(path)
        .with_context(|| format!("JSON export failed: cannot create {}", path.display()))?;
    serde_json::to_writer_pretty(file, &records)
        .with_context(|| format!("JSON export failed: {}", path.display()))?;

    info!(rows = records.len(), path = %path.display(), "Wrote JSON export");
    Ok(())
}

fn write_rows<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    records: &[GigRecord],
) -> csv::Result<()> {
    writer.write_record(CSV_HEADERS)?;
    for r in records {
        writer.write_record([
            r.title.as_str(),
            r.url.as_str(),
            r.seller.as_str(),
            &r.rating.to_string(),
            &r.reviews.to_string(),
            r.price.as_str(),
            r.delivery_time.as_str(),
            &r.completed_jobs.to_string(),
            r.category.as_str(),
            &r.keywords.join(", "),
            r.description.as_str(),
            &r.tags.join(", "),
            r.level.as_str(),
            if r.online { "Online" } else { "Offline" },
            r.response_time.as_str(),
            &r.scraped_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;
