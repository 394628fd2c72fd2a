//! # gigscrape
#![allow(clippy::uninlined_format_args)]
//!
//! CLI tool for scraping freelance gig listings into CSV/JSON, with a
//! library surface for embedding the scraper in other programs.
//!
//! Drives a real browser over WebDriver so listings rendered by
//! JavaScript are visible, extracts gig cards with layered selector and
//! regex fallbacks, and exports sorted results.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Scrape three pages of results for a query
//! gigscrape search logo design --max-pages 3
//!
//! # Filter by rating and price, sorted by seller rating
//! gigscrape search python automation --min-rating 4.5 --max-price 100 --sort rating
//!
//! # Quick single-page fetch without a browser
//! gigscrape fetch data entry --output quick.csv
//!
//! # Aggregate stats from a previous run
//! gigscrape summary --input gigs.json --format simple
//! ```
//!
//! A geckodriver (or chromedriver, with `--browser chrome`) instance must
//! be listening on its default port for the `search` command.
//!
//! ## Library Usage
//!
//! ```no_run
//! use gigscrape::{runner, BrowserType, ScrapeEvent, SearchParams};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let params = SearchParams {
//!     keywords: vec!["logo design".to_string()],
//!     max_pages: 2,
//!     ..SearchParams::default()
//! };
//!
//! let mut handle = runner::spawn_scrape(
//!     params,
//!     runner::BrowserOptions {
//!         browser: BrowserType::Firefox,
//!         headless: true,
//!         proxy: None,
//!     },
//! );
//!
//! while let Some(event) = handle.events.recv().await {
//!     match event {
//!         ScrapeEvent::Page { page, found } => println!("page {page}: {found} gigs"),
//!         ScrapeEvent::Success(records) => println!("total: {}", records.len()),
//!         ScrapeEvent::Error(msg) => eprintln!("{msg}"),
//!         ScrapeEvent::Finished => break,
//!     }
//! }
//! handle.join().await;
//! # Ok(())
//! # }
//! ```

/// Error taxonomy with process exit codes
pub mod errors;

/// Sorting and CSV/TSV/JSON export
pub mod export;

/// Gig card extraction from page HTML
pub mod extract;

/// HTTP-only first-page fetch, no browser required
pub mod fallback;

/// Background scrape task with progress events and cancellation
pub mod runner;

/// Search URL construction, result filters, and the pagination loop
pub mod search;

/// Price parsing and aggregate statistics
pub mod stats;

/// Core record and parameter types
pub mod types;

/// WebDriver browser control and automation
pub mod webdriver;

pub use errors::GigscrapeError;
pub use runner::{BrowserOptions, ScrapeEvent, ScrapeHandle};
pub use stats::Summary;
pub use types::{GigRecord, OutputFormat, SearchParams, SortOrder};
pub use webdriver::{Browser, BrowserType};
