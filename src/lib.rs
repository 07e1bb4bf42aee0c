//! `tubescript` — fetch YouTube transcripts and render them as text, SRT, or JSON.
//!
//! This crate provides:
//! - Video identifier extraction from free-form YouTube URLs
//! - A pluggable caption provider interface, with a built-in YouTube provider
//! - Streaming output encoders (plain text, SRT, JSON)
//! - A small service facade shared by the HTTP server and the CLI
//!
//! Formatting is pure and deterministic; the only I/O happens inside providers.

// High-level API (most consumers should start here).
pub mod config;
pub mod service;

// Transcript data and URL parsing.
pub mod caption;
pub mod video_id;

// Caption sources.
pub mod provider;
pub mod providers;

// Output selection and encoder interfaces.
pub mod format;
pub mod format_type;
pub mod caption_encoder;
pub mod timestamp;

// Output encoders that serialize caption entries into various formats.
pub mod json_array_encoder;
pub mod srt_encoder;
pub mod text_encoder;

// Logging configuration.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use caption::{CaptionEntry, Transcript};
pub use config::{ProviderConfig, ServerConfig};
pub use error::{Error, FetchError, Result};
pub use format::{format_transcript, write_transcript};
pub use format_type::FormatType;
pub use provider::TranscriptProvider;
#[cfg(feature = "youtube")]
pub use providers::youtube::YouTubeProvider;
pub use service::{Availability, Rendered, TranscriptService, resolve_video_url};
pub use timestamp::format_time;
pub use video_id::{VideoId, extract_video_id};

#[cfg(feature = "logging")]
pub use logging::init as init_logging;
