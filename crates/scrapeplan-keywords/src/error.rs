use std::time::Duration;

use thiserror::Error;

/// Errors raised inside a keyword cascade tier. None of them escape
/// [`KeywordSynthesizer::generate`](crate::KeywordSynthesizer::generate); they
/// only decide which tier runs next.
#[derive(Debug, Error)]
pub enum KeywordError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The generative service answered with a non-2xx status.
    #[error("generative API returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// The generative call exceeded its time budget.
    #[error("generative call timed out after {0:?}")]
    Timeout(Duration),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but held no usable keyword candidates.
    #[error("generative response contained no usable keywords")]
    EmptyResponse,

    /// A brief field required by a tier is blank.
    #[error("brief is missing {0}")]
    MissingInput(&'static str),

    #[error("invalid generative client configuration: {0}")]
    InvalidConfig(String),
}
