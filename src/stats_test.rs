// Unit tests for price parsing and aggregation

use super::*;

#[test]
fn test_parse_price_plain_values() {
    assert_eq!(parse_price("$25"), Some(25.0));
    assert_eq!(parse_price("From $25"), Some(25.0));
    assert_eq!(parse_price("$1,200"), Some(1200.0));
    assert_eq!(parse_price("19.99"), Some(19.99));
}

#[test]
fn test_parse_price_k_suffix() {
    assert_eq!(parse_price("5k"), Some(5000.0));
    assert_eq!(parse_price("$2.5K"), Some(2500.0));
    assert_eq!(parse_price("From $1k"), Some(1000.0));
}

#[test]
fn test_parse_price_rejects_non_numeric() {
    assert_eq!(parse_price("Contact for price"), None);
    assert_eq!(parse_price("N/A"), None);
    assert_eq!(parse_price(""), None);
}

#[test]
fn test_parse_price_takes_first_number_of_a_range() {
    assert_eq!(parse_price("$50 - $150"), Some(50.0));
}

fn record(rating: f64, price: &str, jobs: u32, online: bool, level: &str) -> GigRecord {
    GigRecord {
        rating,
        price: price.to_string(),
        completed_jobs: jobs,
        online,
        level: level.to_string(),
        ..GigRecord::default()
    }
}

#[test]
fn test_summary_excludes_unknowns_from_averages() {
    let records = vec![
        record(4.0, "$100", 10, true, "Level 2"),
        record(5.0, "$200", 0, false, "Level 2"),
        record(0.0, "Contact for price", 30, false, "Level 1"),
    ];
    let summary = Summary::from_records(&records);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.rated, 2);
    assert_eq!(summary.avg_rating, 4.5);
    assert_eq!(summary.priced, 2);
    assert_eq!(summary.min_price, 100.0);
    assert_eq!(summary.max_price, 200.0);
    assert_eq!(summary.avg_price, 150.0);
    assert_eq!(summary.with_jobs, 2);
    assert_eq!(summary.total_jobs, 40);
    assert_eq!(summary.max_jobs, 30);
    assert_eq!(summary.online, 1);
    assert_eq!(summary.levels.get("Level 2"), Some(&2));
    assert_eq!(summary.levels.get("Level 1"), Some(&1));
}

#[test]
fn test_summary_of_empty_set_is_all_zero() {
    let summary = Summary::from_records(&[]);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.rated, 0);
    assert_eq!(summary.avg_rating, 0.0);
    assert_eq!(summary.priced, 0);
    assert_eq!(summary.min_price, 0.0);
    assert!(summary.levels.is_empty());
}

#[test]
fn test_render_text_mentions_counts() {
    let records = vec![record(4.0, "$100", 10, true, "Level 2")];
    let text = Summary::from_records(&records).render_text();
    assert!(text.contains("Total gigs: 1"));
    assert!(text.contains("Online sellers: 1"));
    assert!(text.contains("Level 2: 1"));
}
