use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::config::GeminiSettings;
use crate::summarizer::{
    Summarizer,
    api_types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse},
    errors::SummarizeError,
    retry::RetryPolicy,
};

const PROMPT_PREFIX: &str = "Summarize the following text concisely:";

pub fn build_prompt(text: &str) -> String {
    format!("{}\n\n{}", PROMPT_PREFIX, text)
}

/// Summarizer backed by Google's Gemini API.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    retry: RetryPolicy,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Result<Self, SummarizeError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                SummarizeError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            settings.api_url.trim_end_matches('/'),
            settings.model
        );

        info!(model = %settings.model, max_attempts = settings.max_attempts, "Gemini client initialized");

        Ok(Self {
            client,
            endpoint,
            api_key: settings.api_key.clone(),
            retry: RetryPolicy::new(settings.max_attempts, settings.backoff_base),
        })
    }

    /// One request, no retry.
    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| SummarizeError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(SummarizeError::Overloaded);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&error_text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(error_text);
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SummarizeError::Decode(e.to_string()))?;

        body.into_text().ok_or(SummarizeError::EmptyResponse)
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    #[instrument(skip_all, fields(input_chars = text.chars().count()))]
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let prompt = build_prompt(text);
        let summary = self
            .retry
            .run(|attempt| {
                debug!(attempt, "requesting summary");
                self.generate(&prompt)
            })
            .await?;
        info!(summary_chars = summary.chars().count(), "summary generated");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_has_fixed_instruction() {
        assert_eq!(
            build_prompt("Some text."),
            "Summarize the following text concisely:\n\nSome text."
        );
    }
}
