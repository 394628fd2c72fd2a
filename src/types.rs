use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Output format for CLI results
#[derive(Clone, Copy, Debug, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format for programmatic consumption
    Json,
    /// Human-readable simple format
    Simple,
}

/// Result ordering requested from the site
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Site-default relevance ranking
    #[default]
    Relevant,
    /// Most purchased first
    BestSelling,
    /// Newest listings first
    Newest,
    /// Highest seller rating first
    Rating,
}

impl SortOrder {
    /// Value the site expects in the `order` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            SortOrder::Relevant => "relevant",
            SortOrder::BestSelling => "best_selling",
            SortOrder::Newest => "newest",
            SortOrder::Rating => "seller_rating",
        }
    }
}

/// Search request: what to look for and which result filters to apply
#[derive(Clone, Debug)]
pub struct SearchParams {
    /// Search keywords, joined into the query string
    pub keywords: Vec<String>,
    /// Optional category appended to the query string and stamped on records
    pub category: Option<String>,
    /// Minimum parsed price; records without a parseable price fail the bound
    pub min_price: Option<f64>,
    /// Maximum parsed price
    pub max_price: Option<f64>,
    /// Minimum rating; unknown ratings (0.0) fail any positive threshold
    pub min_rating: Option<f64>,
    /// Page budget; pagination may stop earlier
    pub max_pages: usize,
    /// Result ordering
    pub sort: SortOrder,
    /// Delivery-time bound forwarded to the query string (e.g. "3" for 3 days)
    pub delivery_time: Option<String>,
    /// Restrict to sellers currently online (query-string filter)
    pub online_only: bool,
    /// Restrict to top-rated sellers (post-filter on the level badge)
    pub top_rated_only: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            keywords: Vec::new(),
            category: None,
            min_price: None,
            max_price: None,
            min_rating: None,
            max_pages: 3,
            sort: SortOrder::Relevant,
            delivery_time: None,
            online_only: false,
            top_rated_only: false,
        }
    }
}

/// One gig listing observed on one search-results page.
///
/// Every field degrades to a sentinel ("N/A", 0, empty) when the card
/// doesn't expose it; a record is never dropped over a single missing
/// field. Records are not deduplicated across pages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GigRecord {
    /// Listing title
    pub title: String,
    /// Absolute listing URL, or "N/A" when the card carried no link
    pub url: String,
    /// Seller display name
    pub seller: String,
    /// Rating on a 0-5 scale; 0.0 means unknown
    pub rating: f64,
    /// Review count; 0 means unknown
    pub reviews: u32,
    /// Raw price text, currency symbol and ranges included; not normalized
    pub price: String,
    /// Free-text delivery descriptor
    pub delivery_time: String,
    /// Completed-order count; 0 means unknown
    pub completed_jobs: u32,
    /// Assigned by the caller, never parsed from the card
    pub category: String,
    /// Populated by the caller only
    pub keywords: Vec<String>,
    /// Card description, truncated to 200 characters
    pub description: String,
    /// Deduplicated, at most 5 entries
    pub tags: Vec<String>,
    /// Seller level badge text
    pub level: String,
    /// Whether the card showed an online indicator
    pub online: bool,
    /// Free-text response-time descriptor
    pub response_time: String,
    /// When this record was built
    pub scraped_at: DateTime<Utc>,
}

impl Default for GigRecord {
    fn default() -> Self {
        GigRecord {
            title: "N/A".to_string(),
            url: "N/A".to_string(),
            seller: "N/A".to_string(),
            rating: 0.0,
            reviews: 0,
            price: "N/A".to_string(),
            delivery_time: "N/A".to_string(),
            completed_jobs: 0,
            category: String::new(),
            keywords: Vec::new(),
            description: String::new(),
            tags: Vec::new(),
            level: "Level 1".to_string(),
            online: false,
            response_time: "N/A".to_string(),
            scraped_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
