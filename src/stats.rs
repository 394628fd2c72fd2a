//! Numeric aggregation over scraped records.
//!
//! Prices arrive as free text ("From $25", "$1,200", "5k", "Contact for
//! price"), so every aggregate is best-effort: rows that don't parse are
//! left out of the numbers but never dropped from the data set.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::types::GigRecord;

static K_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+\.?\d*)\s*k\b").unwrap());
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.?\d*").unwrap());

/// Best-effort numeric value of a free-text price.
///
/// Strips currency symbols and thousands separators, understands a `k`
/// suffix ("5k" = 5000), otherwise takes the first numeric run. Returns
/// None for text with no usable number.
pub fn parse_price(price: &str) -> Option<f64> {
    let cleaned = price.replace('$', "").replace(',', "");
    let cleaned = cleaned.trim();

    if let Some(m) = K_SUFFIX.captures(cleaned) {
        return m[1].parse::<f64>().ok().map(|v| v * 1000.0);
    }
    NUMBER.find(cleaned)?.as_str().parse().ok()
}

/// Aggregate view over one run's records, serialized for the `summary`
/// subcommand and the end-of-run report.
#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub total: usize,
    /// Records with a known (nonzero) rating
    pub rated: usize,
    pub avg_rating: f64,
    /// Records whose price text parsed numerically
    pub priced: usize,
    pub min_price: f64,
    pub avg_price: f64,
    pub max_price: f64,
    /// Records with a known completed-jobs count
    pub with_jobs: usize,
    pub total_jobs: u64,
    pub max_jobs: u32,
    pub online: usize,
    pub levels: BTreeMap<String, usize>,
}

impl Summary {
    pub fn from_records(records: &[GigRecord]) -> Self {
        let mut summary = Summary {
            total: records.len(),
            ..Summary::default()
        };

        let ratings: Vec<f64> = records
            .iter()
            .map(|r| r.rating)
            .filter(|&r| r > 0.0)
            .collect();
        summary.rated = ratings.len();
        if !ratings.is_empty() {
            summary.avg_rating = ratings.iter().sum::<f64>() / ratings.len() as f64;
        }

        let prices: Vec<f64> = records.iter().filter_map(|r| parse_price(&r.price)).collect();
        summary.priced = prices.len();
        if !prices.is_empty() {
            summary.min_price = prices.iter().cloned().fold(f64::INFINITY, f64::min);
            summary.max_price = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            summary.avg_price = prices.iter().sum::<f64>() / prices.len() as f64;
        }

        for record in records {
            if record.completed_jobs > 0 {
                summary.with_jobs += 1;
                summary.total_jobs += u64::from(record.completed_jobs);
                summary.max_jobs = summary.max_jobs.max(record.completed_jobs);
            }
            if record.online {
                summary.online += 1;
            }
            *summary.levels.entry(record.level.clone()).or_insert(0) += 1;
        }

        summary
    }

    /// Human-readable block for `--format simple`
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Total gigs: {}\n", self.total));
        if self.rated > 0 {
            out.push_str(&format!(
                "Rating: avg {:.2} across {} rated\n",
                self.avg_rating, self.rated
            ));
        }
        if self.priced > 0 {
            out.push_str(&format!(
                "Price: ${:.0}-${:.0}, avg ${:.2} ({} parseable)\n",
                self.min_price, self.max_price, self.avg_price, self.priced
            ));
        }
        if self.with_jobs > 0 {
            out.push_str(&format!(
                "Completed jobs: {} total, {} max\n",
                self.total_jobs, self.max_jobs
            ));
        }
        out.push_str(&format!("Online sellers: {}\n", self.online));
        for (level, count) in &self.levels {
            out.push_str(&format!("  {level}: {count}\n"));
        }
        out
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;
