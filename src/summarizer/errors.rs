use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummarizeError {
    /// Provider answered 503; the only retryable condition.
    #[error("provider overloaded")]
    Overloaded,

    #[error("provider still overloaded after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("provider error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed provider response: {0}")]
    Decode(String),

    #[error("provider returned no summary")]
    EmptyResponse,

    #[error("client configuration error: {0}")]
    Configuration(String),
}

impl SummarizeError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Overloaded)
    }
}
