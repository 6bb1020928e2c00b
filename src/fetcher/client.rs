use crate::fetcher::{
    decode::{decode, detect_encoding},
    errors::FetchError,
    types::PageResponse,
};
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
/// Some sites refuse requests without a browser-looking agent.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; SmartSummarizer/1.0)";

/// HTTP GET for article pages.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(
                    header::ACCEPT,
                    header::HeaderValue::from_static(
                        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                    ),
                );
                headers
            })
            .build()
            .map_err(|e| FetchError::Unknown(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Parse and check a caller-supplied address. Only absolute http(s) URLs
    /// are fetchable.
    pub fn parse_url(raw: &str) -> Result<Url, FetchError> {
        let url = Url::parse(raw.trim())?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }

    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch(&self, url: &Url) -> Result<PageResponse, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let url_final = response.url().clone();
        // Error pages are read like any other; thin ones fail extraction.
        let status = response.status();

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        // Content-Length may be absent or wrong
        if body.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body.len() as u64));
        }

        let encoding = detect_encoding(&content_type, &body);
        let body_utf8 = decode(&body, encoding);
        debug!(
            final_url = %url_final,
            status = %status,
            charset = encoding.name(),
            bytes = body.len(),
            "fetched page"
        );

        Ok(PageResponse {
            url_final,
            body_utf8,
            charset: encoding.name(),
        })
    }
}
