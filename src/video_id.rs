//! Video identifier extraction from user-supplied YouTube URLs.
//!
//! The input is untrusted free text: we search it for the first known YouTube URL shape and
//! capture the 11 characters that follow the path marker. Host matching ignores case; the
//! identifier itself is returned exactly as written.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Length of a YouTube video identifier.
pub const VIDEO_ID_LEN: usize = 11;

/// Shortest input that can possibly match (`youtu.be/` followed by an identifier).
const MIN_MATCH_LEN: usize = "youtu.be/".len() + VIDEO_ID_LEN;

/// Scheme, `www.` and host are case-insensitive. Path markers are optional and tried in
/// order; the capture is the next 11 non-whitespace characters.
const VIDEO_ID_PATTERN: &str = concat!(
    r"(?i:(?:https?://)?(?:www\.)?(?:youtube\.com|youtu\.be))/",
    r"(?:watch\?v=)?(?:embed/)?(?:v/)?(?:shorts/)?(?:live/)?(?:embed/)?(?:shorts/)?(?:v=)?",
    r"(\S{11})",
);

static VIDEO_ID_RE: OnceLock<Regex> = OnceLock::new();

fn video_id_re() -> &'static Regex {
    VIDEO_ID_RE.get_or_init(|| Regex::new(VIDEO_ID_PATTERN).expect("video id pattern must be valid"))
}

/// An 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Accept a bare identifier (e.g. a path parameter).
    ///
    /// Only exactly 11 characters of `[A-Za-z0-9_-]` are accepted, so the value is safe to splice
    /// into request URLs.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == VIDEO_ID_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        valid.then(|| Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the video identifier from the first YouTube URL found in `input`.
///
/// Returns `None` when no known URL marker followed by 11 non-whitespace characters exists.
/// A bare identifier with no URL around it does not match.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    if input.len() < MIN_MATCH_LEN {
        return None;
    }

    video_id_re()
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_owned()))
}
