//! Machine translation through a LibreTranslate-compatible service.
//!
//! Translation is best effort: the public [`Translator::translate`] reports
//! "unavailable" as `None` and callers decide what to fall back to.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{instrument, warn};

use crate::config::TranslateSettings;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("network error: {0}")]
    Network(String),

    #[error("translation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed translation response: {0}")]
    Decode(String),

    #[error("translation response had no translatedText")]
    MissingText,

    #[error("client configuration error: {0}")]
    Configuration(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// `None` when translation is unavailable for any reason.
    async fn translate(&self, text: &str, target_lang: &str) -> Option<String>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

pub struct LibreTranslateClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    pub fn new(settings: &TranslateSettings) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TranslateError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/translate", settings.api_url.trim_end_matches('/')),
            api_key: settings.api_key.clone(),
        })
    }

    /// Source language is always auto-detected by the service.
    pub async fn try_translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError> {
        let request = TranslateRequest {
            q: text,
            source: "auto",
            target: target_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslateError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Decode(e.to_string()))?;

        parsed
            .translated_text
            .filter(|text| !text.trim().is_empty())
            .ok_or(TranslateError::MissingText)
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn translate(&self, text: &str, target_lang: &str) -> Option<String> {
        match self.try_translate(text, target_lang).await {
            Ok(translated) => Some(translated),
            Err(err) => {
                warn!(error = %err, "translation unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let request = TranslateRequest {
            q: "Hello",
            source: "auto",
            target: "fr",
            format: "text",
            api_key: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"q": "Hello", "source": "auto", "target": "fr", "format": "text"})
        );
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = LibreTranslateClient::new(&TranslateSettings {
            api_url: "https://translate.example.com/".into(),
            api_key: None,
        })
        .unwrap();
        assert_eq!(client.endpoint, "https://translate.example.com/translate");
    }
}
