use std::error::Error as StdError;

use thiserror::Error;

/// Tubescript's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Tubescript's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller handed us something we cannot work with (missing or unparseable URL).
    #[error("{0}")]
    InvalidInput(String),

    /// The caption provider reported a failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Failure kinds a [`crate::provider::TranscriptProvider`] can report.
///
/// Providers return these as values; callers match on the kind to pick a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("no transcript found for video '{0}'")]
    NoTranscriptFound(String),

    #[error("transcripts are disabled for video '{0}'")]
    TranscriptsDisabled(String),

    #[error("video '{0}' is unavailable")]
    VideoUnavailable(String),

    #[error("{0}")]
    Unknown(String),
}

impl FetchError {
    /// Whether this is one of the known "no captions for this video" outcomes.
    pub fn is_unavailable_kind(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Short, stable label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoTranscriptFound(_) => "no_transcript",
            Self::TranscriptsDisabled(_) => "disabled",
            Self::VideoUnavailable(_) => "unavailable",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Other(Box::new(err))
    }
}
