//! Parsing of caption tracks downloaded with `fmt=json3`.
//!
//! A json3 track is a list of timed events. Each event carries its timing in milliseconds and
//! its text split into `segs`. Window/style events have no `segs` and are skipped.

use serde::Deserialize;

use crate::caption::{CaptionEntry, Transcript};
use crate::error::FetchError;

#[derive(Debug, Deserialize)]
struct Track {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Option<Vec<Seg>>,
}

#[derive(Debug, Deserialize)]
struct Seg {
    #[serde(default)]
    utf8: String,
}

/// Append `fmt=json3` to a track URL, replacing any format YouTube already chose.
pub(super) fn track_url(base_url: &str) -> String {
    let base = base_url.replace("&fmt=srv3", "");
    format!("{base}&fmt=json3")
}

/// Convert a json3 track body into a [`Transcript`].
///
/// Events whose text is blank (auto-generated tracks emit lone `"\n"` events between lines)
/// are dropped; all other text is kept verbatim.
pub(super) fn parse_track(body: &str) -> Result<Transcript, FetchError> {
    let track: Track = serde_json::from_str(body)
        .map_err(|err| FetchError::Unknown(format!("failed to parse caption track: {err}")))?;

    let transcript = track
        .events
        .into_iter()
        .filter_map(|event| {
            let segs = event.segs?;
            let text: String = segs.into_iter().map(|s| s.utf8).collect();
            if text.trim().is_empty() {
                return None;
            }
            Some(CaptionEntry::new(
                text,
                ms_to_seconds(event.t_start_ms),
                ms_to_seconds(event.d_duration_ms),
            ))
        })
        .collect();

    Ok(transcript)
}

fn ms_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
