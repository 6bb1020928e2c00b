//! Content extraction: fetch a page and reduce it to summarizable text.

pub mod text;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

use crate::fetcher::{FetchError, PageFetcher};

/// Pages yielding less text than this carry too little signal to summarize.
pub const MIN_CONTENT_CHARS: usize = 100;
/// Input ceiling of the summarizer.
pub const MAX_CONTENT_CHARS: usize = 8000;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("page yielded {chars} characters of text")]
    TooLittleContent { chars: usize },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, url: &Url) -> Result<String, ExtractError>;
}

/// Readable text of an HTML document, checked against the minimum and cut to
/// the maximum length.
pub fn extract_from_html(html: &str) -> Result<String, ExtractError> {
    let readable = text::readable_text(html);
    let chars = readable.chars().count();
    if chars < MIN_CONTENT_CHARS {
        return Err(ExtractError::TooLittleContent { chars });
    }
    Ok(text::truncate_chars(&readable, MAX_CONTENT_CHARS).to_string())
}

pub struct WebExtractor {
    fetcher: PageFetcher,
}

impl WebExtractor {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl ContentExtractor for WebExtractor {
    #[instrument(skip_all, fields(url = %url))]
    async fn extract(&self, url: &Url) -> Result<String, ExtractError> {
        let page = self.fetcher.fetch(url).await?;
        let text = extract_from_html(&page.body_utf8)?;
        info!(chars = text.chars().count(), "extracted page text");
        Ok(text)
    }
}
