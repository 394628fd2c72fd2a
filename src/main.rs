#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod errors;
mod export;
mod extract;
mod fallback;
mod runner;
mod search;
mod stats;
pub mod types;
pub mod webdriver;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const _EXIT_COMMAND_ERROR: i32 = 1;
const _EXIT_PAGE_FETCH_FAILED: i32 = 2;
const _EXIT_EXPORT_FAILED: i32 = 3;
const _EXIT_BROWSER_INIT_FAILED: i32 = 4;

use types::{OutputFormat, SearchParams, SortOrder};
use webdriver::BrowserType;

#[derive(Parser)]
#[command(name = "gigscrape")]
#[command(about = "Scrape freelance gig listings into CSV/JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search gig listings with a live browser session
    Search {
        /// Search keywords
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Category filter appended to the query
        #[arg(short, long)]
        category: Option<String>,

        /// Minimum seller rating (0.0 - 5.0)
        #[arg(long)]
        min_rating: Option<f64>,

        /// Minimum price in dollars
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price in dollars
        #[arg(long)]
        max_price: Option<f64>,

        /// Maximum number of result pages to visit
        #[arg(short = 'p', long, default_value = "3")]
        max_pages: usize,

        /// Result ordering
        #[arg(short, long, default_value = "relevant")]
        sort: SortOrder,

        /// Maximum delivery time in days
        #[arg(long)]
        delivery: Option<String>,

        /// Only sellers currently online
        #[arg(long)]
        online_only: bool,

        /// Only top-rated sellers
        #[arg(long)]
        top_rated: bool,

        /// Browser to use (firefox or chrome)
        #[arg(short, long, default_value = "firefox")]
        browser: String,

        /// Run browser in visible mode (disables headless)
        #[arg(long = "no-headless")]
        no_headless: bool,

        /// HTTP proxy for the browser session
        #[arg(long)]
        proxy: Option<String>,

        /// CSV output path (a TSV copy is written alongside)
        #[arg(short, long, default_value = "gigs.csv")]
        output: PathBuf,

        /// Also write a JSON export to this path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Summary output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Fetch the first results page over plain HTTP (no browser)
    Fetch {
        /// Search keywords
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Category filter appended to the query
        #[arg(short, long)]
        category: Option<String>,

        /// Minimum seller rating (0.0 - 5.0)
        #[arg(long)]
        min_rating: Option<f64>,

        /// Minimum price in dollars
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price in dollars
        #[arg(long)]
        max_price: Option<f64>,

        /// Result ordering
        #[arg(short, long, default_value = "relevant")]
        sort: SortOrder,

        /// Only top-rated sellers
        #[arg(long)]
        top_rated: bool,

        /// CSV output path (a TSV copy is written alongside)
        #[arg(short, long, default_value = "gigs.csv")]
        output: PathBuf,

        /// Also write a JSON export to this path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Summary output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Recompute aggregates from a prior JSON export
    Summary {
        /// JSON export to read
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let result = run().await;

    // Handle exit codes based on error type
    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(err) => {
            // Convert to our error type to get proper exit code
            let scrape_err: errors::GigscrapeError = err.into();

            // Output JSON error to stdout for programmatic consumption
            let error_json = json!({
                "error": true,
                "message": scrape_err.to_string(),
                "exit_code": scrape_err.exit_code()
            });
            println!(
                "{}",
                serde_json::to_string(&error_json).unwrap_or_else(|_| "{}".to_string())
            );

            // Also log to stderr for human reading
            eprintln!("Error: {}", scrape_err);
            std::process::exit(scrape_err.exit_code());
        }
    }
}

async fn run() -> Result<()> {
    // Initialize tracing to stderr (so JSON output to stdout remains clean),
    // with a best-effort append-only file copy.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("gigscrape.log")
        .ok()
        .map(|f| {
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(f))
                .with_ansi(false)
        });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gigscrape=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr) // Output logs to stderr
                .with_target(false), // Don't show target module in logs
        )
        .with(log_file)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            keywords,
            category,
            min_rating,
            min_price,
            max_price,
            max_pages,
            sort,
            delivery,
            online_only,
            top_rated,
            browser,
            no_headless,
            proxy,
            output,
            json,
            format,
        } => {
            let params = SearchParams {
                keywords,
                category,
                min_price,
                max_price,
                min_rating,
                max_pages,
                sort,
                delivery_time: delivery,
                online_only,
                top_rated_only: top_rated,
            };
            let browser: BrowserType = browser.parse()?;
            commands::search::handle_search(
                params,
                browser,
                no_headless,
                proxy,
                output,
                json,
                format,
            )
            .await?
        }

        Commands::Fetch {
            keywords,
            category,
            min_rating,
            min_price,
            max_price,
            sort,
            top_rated,
            output,
            json,
            format,
        } => {
            let params = SearchParams {
                keywords,
                category,
                min_price,
                max_price,
                min_rating,
                max_pages: 1,
                sort,
                top_rated_only: top_rated,
                ..SearchParams::default()
            };
            commands::fetch::handle_fetch(params, output, json, format).await?
        }

        Commands::Summary { input, format } => {
            commands::summary::handle_summary(input, format).await?
        }

        Commands::Version => commands::version::handle_version().await?,
    }

    Ok(())
}
