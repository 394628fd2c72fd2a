// Unit tests for card extraction

use super::*;
use pretty_assertions::assert_eq;

const BASE: &str = "https://www.fiverr.com";

const FULL_CARD: &str = r#"
<html><body>
<article data-test="gig-card">
  <h3 class="gig-title">I will design a modern logo</h3>
  <a href="/alice/design-a-modern-logo">View gig</a>
  <a class="username" href="/alice">alice_designs</a>
  <span class="stars">4.9</span>
  <span class="review-count">(132)</span>
  <span class="price">From $1,234</span>
  <p class="description">Clean, modern logo design with unlimited revisions.</p>
  <span class="tag">logo</span>
  <span class="tag">branding</span>
  <span class="tag">logo</span>
  <span class="level-badge">Level 2</span>
  <span class="seller-level">Top Rated Seller</span>
  <span class="online-indicator">Online</span>
  <span class="delivery-time">2 days delivery</span>
  <span class="completed-orders">1,234 orders completed</span>
  <span class="response-time">1 hour response</span>
</article>
</body></html>
"#;

#[test]
fn test_full_card_extracts_every_field() {
    let records = extract_gigs(FULL_CARD, BASE);
    assert_eq!(records.len(), 1);

    let r = &records[0];
    assert_eq!(r.title, "I will design a modern logo");
    assert_eq!(r.url, "https://www.fiverr.com/alice/design-a-modern-logo");
    assert_eq!(r.seller, "alice_designs");
    assert_eq!(r.rating, 4.9);
    assert_eq!(r.reviews, 132);
    // Price text is kept raw, never normalized
    assert_eq!(r.price, "From $1,234");
    assert_eq!(
        r.description,
        "Clean, modern logo design with unlimited revisions."
    );
    assert_eq!(r.tags, vec!["logo", "branding"]);
    assert_eq!(r.delivery_time, "2 days delivery");
    assert_eq!(r.completed_jobs, 1234);
    assert_eq!(r.response_time, "1 hour response");
    assert!(r.online);
}

#[test]
fn test_last_level_badge_wins() {
    // "Top Rated Seller" appears after the generic badge in FULL_CARD
    let records = extract_gigs(FULL_CARD, BASE);
    assert_eq!(records[0].level, "Top Rated Seller");
}

#[test]
fn test_bare_card_falls_back_to_sentinels() {
    let html = r#"
    <article data-test="gig-card">
      <div>Just some unlabelled markup</div>
    </article>
    "#;
    let records = extract_gigs(html, BASE);
    assert_eq!(records.len(), 1);

    let r = &records[0];
    assert_eq!(r.title, "N/A");
    assert_eq!(r.url, "N/A");
    assert_eq!(r.seller, "N/A");
    assert_eq!(r.rating, 0.0);
    assert_eq!(r.reviews, 0);
    assert_eq!(r.price, "N/A");
    assert_eq!(r.level, "Level 1");
    assert!(!r.online);
    assert!(r.tags.is_empty());
}

#[test]
fn test_fallback_discovery_by_class_and_length() {
    // No structural card selector matches; only the block whose class
    // mentions "listing" and whose text is long enough survives.
    let html = r#"
    <html><body>
      <div class="navbar">Home About Contact Pricing Blog Careers Help Center</div>
      <div class="listing-promo">short</div>
      <div class="search-listing">
        <h3 class="title">I will transcribe your podcast episodes quickly</h3>
        <span class="price">$15</span>
      </div>
    </body></html>
    "#;
    let records = extract_gigs(html, BASE);
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].title,
        "I will transcribe your podcast episodes quickly"
    );
    assert_eq!(records[0].price, "$15");
}

#[test]
fn test_unrecognizable_page_yields_nothing() {
    let records = extract_gigs("<html><body><p>404 not found</p></body></html>", BASE);
    assert!(records.is_empty());
}

#[test]
fn test_absolute_links_kept_as_is() {
    let html = r#"
    <article data-test="gig-card">
      <a href="https://cdn.example.com/gig/42">gig</a>
    </article>
    "#;
    let records = extract_gigs(html, BASE);
    assert_eq!(records[0].url, "https://cdn.example.com/gig/42");
}

#[test]
fn test_description_truncated_to_200_chars() {
    let long = "x".repeat(250);
    let html = format!(
        r#"<article data-test="gig-card"><p class="description">{long}</p></article>"#
    );
    let records = extract_gigs(&html, BASE);
    assert_eq!(records[0].description.chars().count(), 200);
}

#[test]
fn test_tags_deduped_capped_and_length_limited() {
    let html = r#"
    <article data-test="gig-card">
      <span class="tag">one</span>
      <span class="tag">two</span>
      <span class="tag">two</span>
      <span class="tag">this tag is far too long to be a real tag label</span>
      <span class="tag">three</span>
      <span class="tag">four</span>
      <span class="tag">five</span>
      <span class="tag">six</span>
    </article>
    "#;
    let records = extract_gigs(html, BASE);
    assert_eq!(records[0].tags, vec!["one", "two", "three", "four", "five"]);
}

#[test]
fn test_jobs_count_strips_thousands_separator() {
    let html = r#"
    <article data-test="gig-card">
      <span class="completed-orders">2,500 orders completed</span>
    </article>
    "#;
    let records = extract_gigs(html, BASE);
    assert_eq!(records[0].completed_jobs, 2500);
}

#[test]
fn test_next_control_detected_by_label_or_class() {
    assert!(has_enabled_next_control(
        r#"<button aria-label="Next page">&gt;</button>"#
    ));
    assert!(has_enabled_next_control(
        r#"<a class="pagination-next" href="/p2">2</a>"#
    ));
    assert!(!has_enabled_next_control(
        "<html><body><p>end of results</p></body></html>"
    ));
}

#[test]
fn test_disabled_next_control_counts_as_absent() {
    assert!(!has_enabled_next_control(
        r#"<button class="pagination-next" disabled>&gt;</button>"#
    ));
    assert!(!has_enabled_next_control(
        r#"<a class="next-page" aria-disabled="true">&gt;</a>"#
    ));
    assert!(!has_enabled_next_control(
        r#"<button class="next-btn disabled">&gt;</button>"#
    ));
    assert!(!has_enabled_next_control(
        r#"<button aria-label="Next" hidden>&gt;</button>"#
    ));
    assert!(!has_enabled_next_control(
        r#"<a class="next-btn" style="display: none">&gt;</a>"#
    ));
}

#[test]
fn test_one_enabled_next_control_is_enough() {
    let html = r#"
      <button class="next-btn" disabled>&gt;</button>
      <a class="next-btn" href="/p3">&gt;</a>
    "#;
    assert!(has_enabled_next_control(html));
}

#[test]
fn test_multiple_cards_keep_page_order() {
    let html = r#"
    <html><body>
      <article data-test="gig-card"><h3 class="gig-title">first</h3></article>
      <article data-test="gig-card"><h3 class="gig-title">second</h3></article>
      <article data-test="gig-card"><h3 class="gig-title">third</h3></article>
    </body></html>
    "#;
    let titles: Vec<String> = extract_gigs(html, BASE)
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}
