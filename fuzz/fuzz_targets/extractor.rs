#![no_main]

use libfuzzer_sys::fuzz_target;
use smartsum::{
    extractor::{MAX_CONTENT_CHARS, MIN_CONTENT_CHARS, extract_from_html},
    fetcher::decode::{decode, detect_encoding},
};

fuzz_target!(|data: &[u8]| {
    // Charset sniffing and decoding must accept any byte soup.
    let encoding = detect_encoding("text/html", data);
    let html = decode(data, encoding);

    // Extraction either rejects the page or returns text within bounds.
    if let Ok(text) = extract_from_html(&html) {
        let chars = text.chars().count();
        assert!(chars <= MAX_CONTENT_CHARS);
        assert!(chars >= MIN_CONTENT_CHARS.min(MAX_CONTENT_CHARS));
    }
});
