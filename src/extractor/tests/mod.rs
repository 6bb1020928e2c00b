use crate::extractor::{ExtractError, MAX_CONTENT_CHARS, MIN_CONTENT_CHARS, extract_from_html};

const ARTICLE: &str = include_str!("fixtures/article.html");

#[test]
fn test_extract_article() {
    let text = extract_from_html(ARTICLE).expect("article should have enough text");

    assert!(text.starts_with("Sample Article About Rivers"));
    assert!(text.contains("first paragraph"));
    assert!(text.contains("second paragraph"));
    assert!(text.contains("Why It Matters"));
    // nav, footer and script text are not paragraphs or headings
    assert!(!text.contains("Subscribe"));
    assert!(!text.contains("console.log"));
    assert!(!text.contains("Copyright"));
    assert!(!text.contains("  "));
}

#[test]
fn test_reject_thin_page() {
    let html = "<html><body><h1>Hi</h1><p>Too short to summarize.</p></body></html>";
    match extract_from_html(html) {
        Err(ExtractError::TooLittleContent { chars }) => assert!(chars < MIN_CONTENT_CHARS),
        other => panic!("expected TooLittleContent, got {:?}", other),
    }
}

#[test]
fn test_reject_page_without_paragraphs() {
    let html = format!("<html><body><div>{}</div></body></html>", "word ".repeat(200));
    assert!(matches!(
        extract_from_html(&html),
        Err(ExtractError::TooLittleContent { chars: 0 })
    ));
}

#[test]
fn test_exactly_minimum_is_accepted() {
    let html = format!("<p>{}</p>", "a".repeat(MIN_CONTENT_CHARS));
    assert_eq!(extract_from_html(&html).unwrap().len(), MIN_CONTENT_CHARS);
}

#[test]
fn test_long_page_is_truncated() {
    let paragraph = format!("<p>{}</p>", "lorem ipsum ".repeat(100));
    let html = format!("<html><body>{}</body></html>", paragraph.repeat(20));

    let text = extract_from_html(&html).unwrap();
    assert_eq!(text.chars().count(), MAX_CONTENT_CHARS);
}

#[cfg(feature = "fuzz")]
mod properties {
    use crate::extractor::{extract_from_html, text::normalize_whitespace};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extraction_never_panics(html in ".{0,2000}") {
            let _ = extract_from_html(&html);
        }

        #[test]
        fn extracted_text_is_bounded_and_collapsed(words in proptest::collection::vec("[a-z]{1,12}", 20..2000)) {
            let html = format!("<p>{}</p>", words.join(" \n\t "));
            if let Ok(text) = extract_from_html(&html) {
                prop_assert!(text.chars().count() <= crate::extractor::MAX_CONTENT_CHARS);
                prop_assert!(!text.contains("  "));
                prop_assert!(!text.contains('\n'));
            }
        }

        #[test]
        fn normalize_is_idempotent(s in "\\PC{0,300}") {
            let once = normalize_whitespace(&s);
            prop_assert_eq!(normalize_whitespace(&once), once.clone());
        }
    }
}
