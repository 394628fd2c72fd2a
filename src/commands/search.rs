use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::commands::utils;
use crate::runner::{self, BrowserOptions, ScrapeEvent};
use crate::types::{OutputFormat, SearchParams};
use crate::webdriver::BrowserType;

#[allow(clippy::too_many_arguments)]
pub async fn handle_search(
    params: SearchParams,
    browser: BrowserType,
    no_headless: bool,
    proxy: Option<String>,
    output: PathBuf,
    json: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    info!(keywords = ?params.keywords, "Starting search");

    let opts = BrowserOptions {
        browser,
        headless: !no_headless,
        proxy,
    };

    let mut handle = runner::spawn_scrape(params, opts);
    let mut records = None;
    let mut fatal: Option<String> = None;

    // Drain progress events; Ctrl-C cancels the in-flight page and we
    // still collect whatever was scraped before the interrupt.
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupt received, cancelling scrape");
                handle.cancel();
            }
            event = handle.events.recv() => match event {
                Some(ScrapeEvent::Page { page, found }) => {
                    info!(page, found, "Page complete");
                }
                Some(ScrapeEvent::Success(batch)) => records = Some(batch),
                Some(ScrapeEvent::Error(msg)) => fatal = Some(msg),
                Some(ScrapeEvent::Finished) | None => break,
            }
        }
    }
    handle.join().await;

    let mut records = match records {
        Some(records) => records,
        // No Success event at all means the session never started
        None => return Err(anyhow::anyhow!(fatal
            .unwrap_or_else(|| "scrape produced no results".to_string()))),
    };
    if let Some(msg) = fatal {
        warn!("Run ended early, keeping partial results: {msg}");
    }

    utils::export_records(&mut records, &output, json.as_deref())?;
    utils::print_summary(&records, format)
}
