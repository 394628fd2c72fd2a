//! Card extraction from rendered search-results HTML.
//!
//! The source markup is external and uncontrolled, so every lookup is an
//! ordered cascade: structural selectors first, then class-keyword and
//! regex heuristics. The cascades trade precision for resilience to
//! markup drift, accepting silent data loss over hard failure. A field
//! that cannot be extracted resolves to its sentinel default; a card is
//! never rejected over a single missing field.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::types::GigRecord;

/// Minimum text length for the broad fallback card scan. Filters out
/// navigation chrome that happens to carry a matching class name.
const FALLBACK_MIN_TEXT: usize = 50;

const DESCRIPTION_MAX_CHARS: usize = 200;
const TAG_MAX_CHARS: usize = 30;
const MAX_TAGS: usize = 5;

/// Selector and regex cascades for card discovery and field extraction.
///
/// Built once per page parse. All patterns are static literals.
pub struct CardRules {
    card_selectors: Vec<Selector>,
    fallback_blocks: Selector,
    fallback_class: Regex,
    title_class: Regex,
    seller_class: Regex,
    rating_class: Regex,
    reviews_class: Regex,
    price_class: Regex,
    description_class: Regex,
    tag_class: Regex,
    level_class: Regex,
    online_class: Regex,
    delivery_class: Regex,
    jobs_class: Regex,
    response_class: Regex,
    rating_value: Regex,
    count_value: Regex,
    jobs_value: Regex,
}

impl CardRules {
    pub fn new() -> Self {
        let card_selectors = [
            r#"article[data-test="gig-card"]"#,
            r#"div[class*="gig-card"]"#,
            r#"div[class*="gig-wrapper"]"#,
        ]
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .collect();

        CardRules {
            card_selectors,
            fallback_blocks: Selector::parse("article, div").unwrap(),
            fallback_class: Regex::new(r"(?i)card|gig|listing").unwrap(),
            title_class: Regex::new(r"(?i)title|gig-title").unwrap(),
            seller_class: Regex::new(r"(?i)seller|user|username").unwrap(),
            rating_class: Regex::new(r"(?i)rating|stars").unwrap(),
            reviews_class: Regex::new(r"(?i)review|rating-count").unwrap(),
            price_class: Regex::new(r"(?i)price|amount").unwrap(),
            description_class: Regex::new(r"(?i)description|text|content").unwrap(),
            tag_class: Regex::new(r"(?i)tag|skill|category").unwrap(),
            level_class: Regex::new(r"(?i)level|badge|seller-level").unwrap(),
            online_class: Regex::new(r"(?i)online|status").unwrap(),
            delivery_class: Regex::new(r"(?i)delivery|time|days").unwrap(),
            jobs_class: Regex::new(r"(?i)orders|completed|delivered").unwrap(),
            response_class: Regex::new(r"(?i)response|reply").unwrap(),
            rating_value: Regex::new(r"(\d+\.?\d*)").unwrap(),
            count_value: Regex::new(r"(\d+)").unwrap(),
            jobs_value: Regex::new(r"(?i)(\d[\d,]*)\s*(orders|completed|delivered)").unwrap(),
        }
    }
}

impl Default for CardRules {
    fn default() -> Self {
        CardRules::new()
    }
}

/// Extract all gig records from a rendered search-results page.
///
/// Relative links are absolutized against `base_url`. Never fails; an
/// unrecognizable page simply yields no records.
pub fn extract_gigs(html: &str, base_url: &str) -> Vec<GigRecord> {
    let rules = CardRules::new();
    let document = Html::parse_document(html);

    discover_cards(&document, &rules)
        .into_iter()
        .map(|card| extract_card(card, &rules, base_url))
        .collect()
}

/// Ordered card-discovery cascade; first strategy with any matches wins.
///
/// When every structural selector misses, falls back to scanning all
/// block elements whose class attribute mentions card/gig/listing and
/// whose text is long enough to plausibly be a listing.
fn discover_cards<'a>(document: &'a Html, rules: &CardRules) -> Vec<ElementRef<'a>> {
    for selector in &rules.card_selectors {
        let cards: Vec<ElementRef> = document.select(selector).collect();
        if !cards.is_empty() {
            return cards;
        }
    }

    document
        .select(&rules.fallback_blocks)
        .filter(|el| {
            el.value()
                .attr("class")
                .is_some_and(|c| rules.fallback_class.is_match(c))
                && element_text(*el).len() > FALLBACK_MIN_TEXT
        })
        .collect()
}

fn extract_card(card: ElementRef, rules: &CardRules, base_url: &str) -> GigRecord {
    let mut record = GigRecord::default();

    if let Some(el) = find_classed(card, &["h3", "a"], &rules.title_class) {
        let text = element_text(el);
        if !text.is_empty() {
            record.title = text;
        }
    }

    if let Some(href) = first_link(card) {
        if !href.is_empty() {
            record.url = absolutize(href, base_url);
        }
    }

    if let Some(el) = find_classed(card, &["a", "span"], &rules.seller_class) {
        let text = element_text(el);
        if !text.is_empty() {
            record.seller = text;
        }
    }

    if let Some(el) = find_classed(card, &["span", "div"], &rules.rating_class) {
        if let Some(m) = rules.rating_value.captures(&element_text(el)) {
            record.rating = m[1].parse().unwrap_or(0.0);
        }
    }

    if let Some(el) = find_classed(card, &["span", "div"], &rules.reviews_class) {
        if let Some(m) = rules.count_value.captures(&element_text(el)) {
            record.reviews = m[1].parse().unwrap_or(0);
        }
    }

    if let Some(el) = find_classed(card, &["span", "div"], &rules.price_class) {
        let text = element_text(el);
        if !text.is_empty() {
            record.price = text;
        }
    }

    if let Some(el) = find_classed(card, &["p", "div"], &rules.description_class) {
        record.description = element_text(el).chars().take(DESCRIPTION_MAX_CHARS).collect();
    }

    record.tags = extract_tags(card, rules);

    // Last matching badge wins, so "Top Rated" outranks a generic level
    // badge appearing earlier in the card.
    for el in find_all_classed(card, &["span", "div"], &rules.level_class) {
        let text = element_text(el);
        let lower = text.to_lowercase();
        if lower.contains("top") || lower.contains("pro") || lower.contains("level") {
            record.level = text;
        }
    }

    record.online = find_classed(card, &["span", "div"], &rules.online_class).is_some();

    if let Some(el) = find_classed(card, &["span", "div"], &rules.delivery_class) {
        let text = element_text(el);
        if !text.is_empty() {
            record.delivery_time = text;
        }
    }

    if let Some(el) = find_classed(card, &["span", "div"], &rules.jobs_class) {
        if let Some(m) = rules.jobs_value.captures(&element_text(el)) {
            record.completed_jobs = m[1].replace(',', "").parse().unwrap_or(0);
        }
    }

    if let Some(el) = find_classed(card, &["span", "div"], &rules.response_class) {
        let text = element_text(el);
        if !text.is_empty() {
            record.response_time = text;
        }
    }

    record
}

/// Deduplicated (first occurrence kept), capped at [`MAX_TAGS`] entries.
fn extract_tags(card: ElementRef, rules: &CardRules) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for el in find_all_classed(card, &["span", "a"], &rules.tag_class) {
        let text = element_text(el);
        if text.is_empty() || text.chars().count() >= TAG_MAX_CHARS {
            continue;
        }
        if !tags.contains(&text) {
            tags.push(text);
        }
        if tags.len() == MAX_TAGS {
            break;
        }
    }
    tags
}

/// First descendant with one of `tags` whose class attribute matches.
fn find_classed<'a>(
    card: ElementRef<'a>,
    tags: &[&str],
    class_pattern: &Regex,
) -> Option<ElementRef<'a>> {
    descendant_elements(card).find(|el| {
        tags.contains(&el.value().name())
            && el
                .value()
                .attr("class")
                .is_some_and(|c| class_pattern.is_match(c))
    })
}

fn find_all_classed<'a, 'b>(
    card: ElementRef<'a>,
    tags: &'b [&'b str],
    class_pattern: &'b Regex,
) -> impl Iterator<Item = ElementRef<'a>> + use<'a, 'b> {
    descendant_elements(card).filter(move |el| {
        tags.contains(&el.value().name())
            && el
                .value()
                .attr("class")
                .is_some_and(|c| class_pattern.is_match(c))
    })
}

fn descendant_elements<'a>(card: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    // skip(1): descendants() yields the card itself first
    card.descendants().skip(1).filter_map(ElementRef::wrap)
}

fn first_link(card: ElementRef) -> Option<&str> {
    descendant_elements(card)
        .find(|el| el.value().name() == "a" && el.value().attr("href").is_some())
        .and_then(|el| el.value().attr("href"))
}

fn absolutize(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    Url::parse(base_url)
        .and_then(|base| base.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| format!("{base_url}{href}"))
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Selector cascade for the "next page" control
const NEXT_CONTROL_SELECTOR: &str =
    r#"[aria-label*="Next"], button[class*="next"], a[class*="next"]"#;

/// Whether the page carries a usable "next page" control.
///
/// A control that is disabled (disabled/aria-disabled attributes, a
/// "disabled" class) or hidden is treated the same as an absent one.
pub fn has_enabled_next_control(html: &str) -> bool {
    let Ok(selector) = Selector::parse(NEXT_CONTROL_SELECTOR) else {
        return false;
    };
    Html::parse_document(html)
        .select(&selector)
        .any(|el| !control_disabled(el))
}

fn control_disabled(el: ElementRef) -> bool {
    let v = el.value();
    v.attr("disabled").is_some()
        || v.attr("hidden").is_some()
        || v.attr("aria-disabled").is_some_and(|a| a.eq_ignore_ascii_case("true"))
        || v.attr("class").is_some_and(|c| c.to_lowercase().contains("disabled"))
        || v.attr("style").is_some_and(|s| s.replace(' ', "").contains("display:none"))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod extract_test;
