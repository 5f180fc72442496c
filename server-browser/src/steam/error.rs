//! Provider error types.

/// Longest upstream body kept in an error, in characters.
const EXCERPT_CHARS: usize = 500;

/// The start of an upstream body, short enough to log.
pub(crate) fn excerpt(body: &str) -> String {
    body.chars().take(EXCERPT_CHARS).collect()
}

/// Errors that can occur while fetching the server list.
///
/// All of these are recoverable from the cache's point of view: the
/// previous snapshot keeps being served and the next request retries.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Connection, TLS or timeout failure reaching the upstream
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API key was rejected
    #[error("unauthorized: check the Steam Web API key")]
    Unauthorized,

    /// Upstream answered with a non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected schema
    #[error("decode error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    /// Recorded response for the mock provider could not be read
    #[error("mock data error: {message}")]
    MockData { message: String },
}

impl ProviderError {
    /// Build a decode error, keeping a short excerpt of the offending body.
    pub(crate) fn decode(err: impl std::fmt::Display, body: &str) -> Self {
        ProviderError::Decode {
            message: err.to_string(),
            body: Some(excerpt(body)),
        }
    }
}
