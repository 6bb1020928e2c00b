use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static READABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, h1, h2, h3").expect("valid selector"));

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Text of every paragraph and h1-h3 heading, in document order, joined by
/// single spaces.
pub fn readable_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let joined = document
        .select(&READABLE_SELECTOR)
        .map(|element| element.text().collect::<String>())
        .map(|text| text.trim().to_string())
        .collect::<Vec<_>>()
        .join(" ");

    normalize_whitespace(&joined)
}

/// Trim and collapse every whitespace run (newlines included) to one space.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned()
}

/// First `max` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
