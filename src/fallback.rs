//! Plain-HTTP fallback: fetch the first results page without a browser.
//!
//! Dynamic, lazy-loaded content never renders on this path, so the page
//! may carry fewer cards than the browser sees. First page only.

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;
use tracing::info;

use crate::search;
use crate::types::SearchParams;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch the raw HTML of the page-1 search results over plain HTTP.
pub async fn fetch_first_page(params: &SearchParams) -> Result<String> {
    let url = search::build_search_url(params, 1);
    info!(url = %url, "Fetching first results page over HTTP");

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(&url)
        .header(USER_AGENT, fake_user_agent::get_rua())
        .header(
            ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .send()
        .await
        .context("Failed to fetch results page 1")?;

    let response = response
        .error_for_status()
        .context("Failed to fetch results page 1")?;

    response
        .text()
        .await
        .context("Failed to fetch results page 1")
}
