//! Per-page search work: URL construction, request pacing, scroll and
//! extract, and the result filters. The page loop itself lives in
//! [`crate::runner`].

use anyhow::{Context, Result};
use rand::Rng;
use std::ops::Range;
use std::time::Duration;
use tracing::info;
use url::form_urlencoded;

use crate::extract;
use crate::stats::parse_price;
use crate::types::{GigRecord, SearchParams};
use crate::webdriver::Browser;

pub const SITE_ORIGIN: &str = "https://www.fiverr.com";
const SEARCH_ENDPOINT: &str = "https://www.fiverr.com/search/gigs";

/// Pause after navigation, before reading the page (seconds)
const PAGE_SETTLE_SECS: Range<f64> = 2.0..4.0;
/// Pause between consecutive pages (seconds)
pub(crate) const PAGE_GAP_SECS: Range<f64> = 3.0..6.0;

/// Build the search URL for one results page.
///
/// Keywords and category are joined into one query-encoded term; the page
/// number is appended only for page > 1, matching the site's convention.
pub fn build_search_url(params: &SearchParams, page: usize) -> String {
    let mut terms: Vec<&str> = params.keywords.iter().map(String::as_str).collect();
    if let Some(category) = &params.category {
        terms.push(category);
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("query", &terms.join(" "));
    query.append_pair("order", params.sort.as_query());
    if let Some(delivery) = &params.delivery_time {
        query.append_pair("delivery", delivery);
    }
    if params.online_only {
        query.append_pair("online", "true");
    }
    if page > 1 {
        query.append_pair("page", &page.to_string());
    }

    format!("{}?{}", SEARCH_ENDPOINT, query.finish())
}

/// Apply the record-level filters, preserving relative order.
///
/// Unknown values fail positive thresholds: a rating of 0.0 fails any
/// `min_rating > 0`, and a price that doesn't parse fails any price
/// bound. Records pass untouched when no bound is set.
pub fn apply_filters(records: Vec<GigRecord>, params: &SearchParams) -> Vec<GigRecord> {
    records
        .into_iter()
        .filter(|r| {
            if let Some(min) = params.min_rating {
                if r.rating < min {
                    return false;
                }
            }
            if params.min_price.is_some() || params.max_price.is_some() {
                let Some(price) = parse_price(&r.price) else {
                    return false;
                };
                if params.min_price.is_some_and(|min| price < min) {
                    return false;
                }
                if params.max_price.is_some_and(|max| price > max) {
                    return false;
                }
            }
            if params.top_rated_only && !r.level.to_lowercase().contains("top") {
                return false;
            }
            true
        })
        .collect()
}

/// Fetch, scroll, and extract one results page, returning the filtered
/// batch with the search keywords and category stamped on.
pub async fn scrape_page(
    browser: &Browser,
    params: &SearchParams,
    page: usize,
) -> Result<Vec<GigRecord>> {
    let url = build_search_url(params, page);
    info!(page, url = %url, "Fetching results page");

    browser
        .goto(&url)
        .await
        .with_context(|| format!("Failed to fetch results page {page}"))?;
    pause(PAGE_SETTLE_SECS).await;

    browser
        .scroll_to_bottom()
        .await
        .with_context(|| format!("Failed to fetch results page {page}"))?;
    let html = browser
        .page_source()
        .await
        .with_context(|| format!("Failed to fetch results page {page}"))?;

    let mut records = extract::extract_gigs(&html, SITE_ORIGIN);
    for record in &mut records {
        record.keywords = params.keywords.clone();
        if let Some(category) = &params.category {
            record.category = category.clone();
        }
    }

    Ok(apply_filters(records, params))
}

/// Sleep a random interval to emulate human pacing.
pub(crate) async fn pause(secs: Range<f64>) {
    let duration = {
        let mut rng = rand::thread_rng();
        Duration::from_secs_f64(rng.gen_range(secs))
    };
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;
