//! Typed errors for the review analysis library.
//!
//! Uses `thiserror` for library errors (not `anyhow`); the binary wraps
//! them with context.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single review could not be scored.
///
/// Every variant is recoverable at review granularity: the orchestrator
/// drops the review, logs the failure and carries on with the rest.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScoreFailure {
    /// Provider or channel unreachable, non-2xx status, or timed out
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// Provider reply did not contain a well-formed JSON object
    #[error("parse failure: {message}")]
    Parse { message: String },

    /// JSON object lacked one or more numeric sub-score fields
    #[error("schema failure: missing or non-numeric fields {missing:?}")]
    Schema { missing: Vec<String> },

    /// Provider credential absent or unset
    #[error("config failure: {message}")]
    Config { message: String },
}

impl ScoreFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Short tag used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoreFailure::Transport { .. } => "transport",
            ScoreFailure::Parse { .. } => "parse",
            ScoreFailure::Schema { .. } => "schema",
            ScoreFailure::Config { .. } => "config",
        }
    }
}

impl From<gemini_client::GeminiError> for ScoreFailure {
    fn from(err: gemini_client::GeminiError) -> Self {
        use gemini_client::GeminiError;

        match err {
            GeminiError::Config(message) => ScoreFailure::Config { message },
            GeminiError::Network(message) | GeminiError::Api(message) => {
                ScoreFailure::Transport { message }
            }
            GeminiError::Parse(message) => ScoreFailure::Parse { message },
        }
    }
}

/// Errors from the persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored analysis is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The privileged process holding the store is gone
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the presentation collaborator.
#[derive(Debug, Error)]
pub enum PresentError {
    /// No anchor element to attach the summary block to
    #[error("no anchor element found for the summary block")]
    NoAnchor,

    /// The surface itself refused the block
    #[error("presentation failed: {0}")]
    Surface(String),
}

/// Errors building an extractor from configured selectors.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid CSS selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("selector list {name} is empty")]
    EmptySelectorList { name: &'static str },
}

/// Errors loading a page to analyze.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid page URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to read page: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors talking to a running page session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session task has stopped; the page should be reloaded
    #[error("page session is not running")]
    Closed,
}

/// Result type alias for per-review scoring.
pub type ScoreResult<T> = std::result::Result<T, ScoreFailure>;

/// Result type alias for persistence operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
