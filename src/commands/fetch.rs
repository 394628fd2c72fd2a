use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::commands::utils;
use crate::extract;
use crate::fallback;
use crate::search::{self, SITE_ORIGIN};
use crate::types::{OutputFormat, SearchParams};

/// HTTP-only fallback: first results page, no browser, no scrolling.
pub async fn handle_fetch(
    params: SearchParams,
    output: PathBuf,
    json: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let html = fallback::fetch_first_page(&params).await?;

    let mut records = extract::extract_gigs(&html, SITE_ORIGIN);
    for record in &mut records {
        record.keywords = params.keywords.clone();
        if let Some(category) = &params.category {
            record.category = category.clone();
        }
    }
    let mut records = search::apply_filters(records, &params);
    info!(found = records.len(), "Extracted gigs from first page");

    utils::export_records(&mut records, &output, json.as_deref())?;
    utils::print_summary(&records, format)
}
