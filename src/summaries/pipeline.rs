//! Summarize-and-store pipeline.
//!
//! Each request moves through four stages in order: acquire the text,
//! summarize it in English, localize the summary, persist the record. A
//! failure in the first two stages ends the request before anything is
//! written; localization never fails.

use tracing::{error, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::{
    app_state::AppState,
    entities::{DEFAULT_LANGUAGE, NewSummary, Summary},
    error::{ApiError, ApiResult},
    extractor::ExtractError,
};

pub const THIN_CONTENT_MESSAGE: &str = "Failed to extract meaningful content from URL.";
pub const INVALID_URL_MESSAGE: &str = "A valid URL is required.";

/// Where the text to summarize comes from.
#[derive(Debug, Clone)]
pub enum Source {
    Text(String),
    Url(Url),
}

impl Source {
    /// What the history shows as the original text.
    pub fn original_text(&self) -> String {
        match self {
            Source::Text(text) => text.clone(),
            Source::Url(url) => format!("Content from URL: {}", url),
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Source::Text(_) => "Failed to summarize text",
            Source::Url(_) => "Failed to summarize content from URL.",
        }
    }
}

/// Requested language, or English when none was given.
pub fn resolve_language(requested: Option<&str>) -> String {
    requested
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string()
}

fn needs_translation(language: &str) -> bool {
    !language.eq_ignore_ascii_case(DEFAULT_LANGUAGE)
}

pub struct SummaryPipeline<'a> {
    state: &'a AppState,
}

impl<'a> SummaryPipeline<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[instrument(skip(self, source), fields(owner = %owner, language = %language))]
    pub async fn run(&self, owner: Uuid, source: Source, language: &str) -> ApiResult<Summary> {
        let content = self.acquire(&source).await?;
        let english = self.summarize(&content, source.failure_message()).await?;
        let summary_text = self.localize(english, language).await;

        let record = NewSummary {
            user_id: owner,
            original_text: source.original_text(),
            summary_text,
            language: language.to_string(),
        };
        self.persist(record, source.failure_message()).await
    }

    async fn acquire(&self, source: &Source) -> ApiResult<String> {
        match source {
            Source::Text(text) => Ok(text.clone()),
            Source::Url(url) => self.state.extractor.extract(url).await.map_err(|e| match e {
                ExtractError::TooLittleContent { chars } => {
                    info!(chars, "page too thin to summarize");
                    ApiError::Validation(THIN_CONTENT_MESSAGE.to_string())
                }
                ExtractError::Fetch(fetch) if fetch.is_caller_error() => {
                    ApiError::Validation(INVALID_URL_MESSAGE.to_string())
                }
                ExtractError::Fetch(fetch) => {
                    error!(error = %fetch, "page fetch failed");
                    ApiError::Upstream(source.failure_message().to_string())
                }
            }),
        }
    }

    async fn summarize(&self, content: &str, failure: &str) -> ApiResult<String> {
        self.state.summarizer.summarize(content).await.map_err(|e| {
            error!(error = %e, "summarization failed");
            ApiError::Upstream(failure.to_string())
        })
    }

    /// Translated summary when a non-English language was requested and the
    /// translation came back non-empty; the English summary otherwise.
    pub async fn localize(&self, summary: String, language: &str) -> String {
        if !needs_translation(language) {
            return summary;
        }
        match self.state.translator.translate(&summary, language).await {
            Some(translated) if !translated.trim().is_empty() => translated,
            _ => {
                warn!(language, "keeping English summary");
                summary
            }
        }
    }

    async fn persist(&self, record: NewSummary, failure: &str) -> ApiResult<Summary> {
        let saved = self
            .state
            .summary_repo
            .create(record)
            .await
            .map_err(|e| ApiError::persistence(failure, e))?;
        info!(summary_id = %saved.id, "summary stored");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app_state::test_support::TestState, fetcher::FetchError, summarizer::SummarizeError,
    };
    use chrono::Utc;
    use mockall::predicate::eq;

    fn echo_store(test: &mut TestState) {
        test.summaries.expect_create().returning(|new| {
            Ok(Summary {
                id: Uuid::new_v4(),
                user_id: new.user_id,
                original_text: new.original_text,
                summary_text: new.summary_text,
                language: new.language,
                created_at: Utc::now(),
            })
        });
    }

    #[test]
    fn test_resolve_language() {
        assert_eq!(resolve_language(None), "en");
        assert_eq!(resolve_language(Some("  ")), "en");
        assert_eq!(resolve_language(Some("fr")), "fr");
    }

    #[test]
    fn test_url_marker() {
        let url = Url::parse("https://example.com/a").unwrap();
        assert_eq!(
            Source::Url(url).original_text(),
            "Content from URL: https://example.com/a"
        );
    }

    #[tokio::test]
    async fn test_english_skips_translator() {
        let mut test = TestState::new();
        test.summarizer
            .expect_summarize()
            .returning(|_| Ok("Short.".to_string()));
        test.translator.expect_translate().never();
        echo_store(&mut test);
        let state = test.build();

        let saved = SummaryPipeline::new(&state)
            .run(Uuid::new_v4(), Source::Text("Long text".into()), "EN")
            .await
            .unwrap();
        assert_eq!(saved.summary_text, "Short.");
        assert_eq!(saved.original_text, "Long text");
    }

    #[tokio::test]
    async fn test_translation_replaces_summary() {
        let mut test = TestState::new();
        test.summarizer
            .expect_summarize()
            .returning(|_| Ok("Hello".to_string()));
        test.translator
            .expect_translate()
            .with(eq("Hello"), eq("es"))
            .returning(|_, _| Some("Hola".to_string()));
        echo_store(&mut test);
        let state = test.build();

        let saved = SummaryPipeline::new(&state)
            .run(Uuid::new_v4(), Source::Text("x".into()), "es")
            .await
            .unwrap();
        assert_eq!(saved.summary_text, "Hola");
        assert_eq!(saved.language, "es");
    }

    #[tokio::test]
    async fn test_blank_translation_keeps_english() {
        let mut test = TestState::new();
        test.translator
            .expect_translate()
            .returning(|_, _| Some("  ".to_string()));
        let state = test.build();

        let text = SummaryPipeline::new(&state)
            .localize("Hello".to_string(), "de")
            .await;
        assert_eq!(text, "Hello");
    }

    #[tokio::test]
    async fn test_summarizer_failure_writes_nothing() {
        let mut test = TestState::new();
        test.summarizer
            .expect_summarize()
            .returning(|_| Err(SummarizeError::Exhausted { attempts: 3 }));
        test.summaries.expect_create().never();
        let state = test.build();

        let err = SummaryPipeline::new(&state)
            .run(Uuid::new_v4(), Source::Text("x".into()), "en")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Upstream(ref m) if m == "Failed to summarize text"));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_upstream() {
        let mut test = TestState::new();
        test.extractor
            .expect_extract()
            .returning(|_| Err(ExtractError::Fetch(FetchError::Timeout)));
        test.summarizer.expect_summarize().never();
        let state = test.build();

        let url = Url::parse("https://example.com").unwrap();
        let err = SummaryPipeline::new(&state)
            .run(Uuid::new_v4(), Source::Url(url), "en")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Upstream(_)));
    }
}
