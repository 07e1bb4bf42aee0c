//! High-level API for fetching and rendering transcripts.
//!
//! `TranscriptService` wires URL extraction → provider → formatter so the HTTP server and
//! the CLI share one code path. It holds no per-request state: every call is independent and
//! the service can be cloned freely across tasks.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::caption::Transcript;
use crate::error::{Error, Result};
use crate::format::format_transcript;
use crate::format_type::FormatType;
use crate::provider::TranscriptProvider;
use crate::video_id::{VideoId, extract_video_id};

/// Message for a request without a usable `video_url`.
pub const MISSING_URL_MESSAGE: &str = "No video URL provided";

/// Message for a `video_url` we could not extract an identifier from.
pub const INVALID_URL_MESSAGE: &str = "Invalid YouTube URL";

/// Outcome of an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub available: bool,
    pub message: String,
}

impl Availability {
    fn available() -> Self {
        Self {
            available: true,
            message: "Transcript is available".to_owned(),
        }
    }

    fn unavailable() -> Self {
        Self {
            available: false,
            message: "Transcript is not available for this video".to_owned(),
        }
    }
}

/// A transcript rendered in a particular format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub video_id: VideoId,
    pub format: FormatType,
    pub body: String,
}

impl Rendered {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Validate a raw `video_url` value and extract its identifier.
///
/// Missing and empty values are both treated as "no URL provided".
pub fn resolve_video_url(video_url: Option<&str>) -> Result<VideoId> {
    let Some(url) = video_url.filter(|u| !u.is_empty()) else {
        return Err(Error::invalid_input(MISSING_URL_MESSAGE));
    };

    extract_video_id(url).ok_or_else(|| {
        error!(video_url = %url, "invalid YouTube URL");
        Error::invalid_input(INVALID_URL_MESSAGE)
    })
}

/// The main transcript entry point.
///
/// Typical usage:
/// - Construct once with a provider.
/// - Call `transcript` / `check` per request.
pub struct TranscriptService<P> {
    provider: Arc<P>,
}

impl<P> Clone for TranscriptService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: TranscriptProvider> TranscriptService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Fetch the transcript for an already-extracted identifier.
    pub async fn fetch(&self, video_id: &VideoId) -> Result<Transcript> {
        info!(%video_id, "fetching transcript");
        let transcript = self.provider.fetch(video_id).await.map_err(|err| {
            error!(%video_id, kind = err.kind(), error = %err, "transcript fetch failed");
            Error::Fetch(err)
        })?;
        info!(%video_id, entries = transcript.len(), "transcript fetched");
        Ok(transcript)
    }

    /// Resolve `video_url`, fetch its transcript, and render it as `format`.
    pub async fn transcript(&self, video_url: Option<&str>, format: FormatType) -> Result<Rendered> {
        let video_id = resolve_video_url(video_url)?;
        let transcript = self.fetch(&video_id).await?;
        let body = format_transcript(&transcript, format)?;

        Ok(Rendered {
            video_id,
            format,
            body,
        })
    }

    /// Resolve `video_url` and report whether any transcript exists for it.
    ///
    /// The known "no captions" failure kinds are an answer, not an error; only unexpected
    /// provider failures are returned as `Err`.
    pub async fn check(&self, video_url: Option<&str>) -> Result<Availability> {
        let video_id = resolve_video_url(video_url)?;

        match self.provider.check_availability(&video_id).await {
            Ok(()) => Ok(Availability::available()),
            Err(err) if err.is_unavailable_kind() => {
                info!(%video_id, kind = err.kind(), "transcript not available");
                Ok(Availability::unavailable())
            }
            Err(err) => {
                error!(%video_id, error = %err, "error checking transcript availability");
                Err(Error::Fetch(err))
            }
        }
    }
}
