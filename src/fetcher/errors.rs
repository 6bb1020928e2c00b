use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("connect error: {0}")]
    Connect(String),

    #[error("request timeout")]
    Timeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("io error: {0}")]
    Io(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// True when the caller handed us something we could never fetch, as
    /// opposed to the remote side failing.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::UnsupportedScheme(_))
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}
