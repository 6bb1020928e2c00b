//! Summarization client: text in, provider summary out.

pub mod api_types;
pub mod errors;
pub mod gemini;
pub mod retry;

use async_trait::async_trait;

pub use errors::SummarizeError;
pub use gemini::GeminiClient;
pub use retry::RetryPolicy;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Provider summary, verbatim.
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}
