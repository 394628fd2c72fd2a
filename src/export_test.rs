// Unit tests for export sorting and writers

use super::*;
use crate::types::GigRecord;

fn record(title: &str, rating: f64, jobs: u32) -> GigRecord {
    GigRecord {
        title: title.to_string(),
        rating,
        completed_jobs: jobs,
        ..GigRecord::default()
    }
}

#[test]
fn test_sort_rating_desc_then_jobs_desc() {
    let mut records = vec![
        record("mid", 4.2, 300),
        record("top", 4.9, 120),
        record("unknown", 0.0, 5),
    ];
    sort_records(&mut records);

    let order: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(order, vec!["top", "mid", "unknown"]);
}

#[test]
fn test_sort_breaks_rating_ties_on_jobs() {
    let mut records = vec![
        record("fewer", 4.5, 10),
        record("more", 4.5, 900),
    ];
    sort_records(&mut records);
    assert_eq!(records[0].title, "more");
}

#[test]
fn test_csv_roundtrip_preserves_rows_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gigs.csv");

    let mut records = vec![
        record("b", 4.0, 1),
        record("a", 5.0, 2),
        record("c", 3.0, 3),
    ];
    write_csv(&mut records, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), CSV_HEADERS.len());
    assert_eq!(&headers[0], "Title");
    assert_eq!(&headers[15], "Scraped At");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    // Sorted by rating descending
    assert_eq!(&rows[0][0], "a");
    assert_eq!(&rows[1][0], "b");
    assert_eq!(&rows[2][0], "c");
    assert_eq!(&rows[0][3], "5");
}

#[test]
fn test_csv_joins_list_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gigs.csv");

    let mut records = vec![GigRecord {
        tags: vec!["logo".to_string(), "branding".to_string()],
        keywords: vec!["logo design".to_string()],
        online: true,
        ..GigRecord::default()
    }];
    write_csv(&mut records, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(&row[9], "logo design");
    assert_eq!(&row[11], "logo, branding");
    assert_eq!(&row[13], "Online");
}

#[test]
fn test_csv_unwritable_path_is_an_error() {
    let mut records = vec![record("a", 4.0, 1)];
    let result = write_csv(&mut records, std::path::Path::new("/nonexistent/dir/gigs.csv"));
    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("CSV export failed"));
}

#[test]
fn test_tsv_failure_is_swallowed() {
    let mut records = vec![record("a", 4.0, 1)];
    // Returns unit either way; an unwritable path must not panic
    write_tsv(&mut records, std::path::Path::new("/nonexistent/dir/gigs.tsv"));
}

#[test]
fn test_tsv_uses_tab_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gigs.tsv");

    let mut records = vec![record("tabbed", 4.0, 1)];
    write_tsv(&mut records, &path);

    let contents = std::fs::read_to_string(&path).unwrap();
    let header = contents.lines().next().unwrap();
    assert!(header.starts_with("Title\tURL\tFreelancer"));
}

#[test]
fn test_json_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gigs.json");

    let mut records = vec![record("b", 4.0, 1), record("a", 5.0, 2)];
    write_json(&mut records, &path).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let back: Vec<GigRecord> = serde_json::from_reader(file).unwrap();
    assert_eq!(back.len(), 2);
    // JSON export is sorted like the CSV
    assert_eq!(back[0].title, "a");
    assert_eq!(back, records);
}
