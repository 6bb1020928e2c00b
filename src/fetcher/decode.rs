//! Body decoding: header charset, then `<meta>` declarations in the first
//! 4 KiB, then statistical detection.

use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;

use tracing::debug;

const SNIFF_LEN: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid charset regex")
});

static META_CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>;]+)"#)
        .expect("valid meta charset regex")
});

pub fn detect_encoding(content_type: &str, body: &[u8]) -> &'static Encoding {
    if let Some(encoding) = label_from(&CHARSET_REGEX, content_type) {
        return encoding;
    }

    let head = &body[..body.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);
    // Also matches `<meta http-equiv="Content-Type" content="...; charset=...">`.
    if let Some(encoding) = label_from(&META_CHARSET_REGEX, &head_str) {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, body.len() <= SNIFF_LEN);
    detector.guess(None, true)
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str();
    Encoding::for_label(label.trim().as_bytes())
}

/// Lossy decode. Stray bytes become U+FFFD rather than failing the page.
pub fn decode(body: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, used, had_errors) = encoding.decode(body);
    if had_errors {
        debug!(encoding = used.name(), "body contained malformed sequences");
    }
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_from_content_type() {
        let encoding = detect_encoding("text/html; charset=utf-8", b"<html></html>");
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn test_charset_from_meta_tag() {
        let body = b"<html><head><meta charset=\"iso-8859-1\"></head></html>";
        // ISO-8859-1 is an alias of windows-1252 in the WHATWG table
        assert_eq!(detect_encoding("text/html", body), encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_charset_from_http_equiv() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=shift_jis\"></head></html>";
        assert_eq!(detect_encoding("text/html", body), encoding_rs::SHIFT_JIS);
    }

    #[test]
    fn test_decode_latin1_body() {
        let body = b"caf\xe9";
        assert_eq!(decode(body, encoding_rs::WINDOWS_1252), "café");
    }

    #[test]
    fn test_decode_replaces_malformed_utf8() {
        assert_eq!(decode(b"abc\xff", encoding_rs::UTF_8), "abc\u{FFFD}");
    }
}
