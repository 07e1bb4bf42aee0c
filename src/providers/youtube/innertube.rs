//! InnerTube player response parsing.
//!
//! We only model the fields we read. Everything else in the (very large) player response is
//! ignored by serde.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::FetchError;
use crate::video_id::VideoId;

static API_KEY_RE: OnceLock<Regex> = OnceLock::new();
static CONSENT_VALUE_RE: OnceLock<Regex> = OnceLock::new();

fn api_key_re() -> &'static Regex {
    API_KEY_RE.get_or_init(|| {
        Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#)
            .expect("api key pattern must be valid")
    })
}

fn consent_value_re() -> &'static Regex {
    CONSENT_VALUE_RE.get_or_init(|| {
        Regex::new(r#"name="v" value="(.*?)""#).expect("consent pattern must be valid")
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    #[serde(default)]
    playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    #[serde(default)]
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    tracklist: Option<Tracklist>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tracklist {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

/// One caption track advertised by the player response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CaptionTrack {
    pub(super) base_url: String,
    pub(super) language_code: String,
    /// `"asr"` for auto-generated tracks.
    #[serde(default)]
    pub(super) kind: Option<String>,
}

impl CaptionTrack {
    pub(super) fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Whether the watch page is YouTube's cookie consent interstitial.
pub(super) fn is_consent_page(html: &str) -> bool {
    html.contains("action=\"https://consent.youtube.com/s\"")
}

/// Value for the `CONSENT` cookie that skips the interstitial.
pub(super) fn consent_cookie(html: &str) -> Option<String> {
    consent_value_re()
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("CONSENT=YES+{}", m.as_str()))
}

/// Pull the InnerTube API key out of the watch page HTML.
pub(super) fn extract_api_key(html: &str, video_id: &VideoId) -> Result<String, FetchError> {
    if html.contains("class=\"g-recaptcha\"") {
        return Err(FetchError::Unknown(format!(
            "request for video '{video_id}' was blocked by a captcha"
        )));
    }

    api_key_re()
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| {
            FetchError::Unknown(format!(
                "could not find the InnerTube API key for video '{video_id}'"
            ))
        })
}

/// Validate playability and return the advertised caption tracks.
///
/// A missing or empty track list means the owner disabled captions.
pub(super) fn caption_tracks(
    body: &str,
    video_id: &VideoId,
) -> Result<Vec<CaptionTrack>, FetchError> {
    let player: PlayerResponse = serde_json::from_str(body).map_err(|err| {
        FetchError::Unknown(format!("failed to parse player response: {err}"))
    })?;

    if let Some(status) = &player.playability_status {
        check_playability(status, video_id)?;
    }

    let tracks = player
        .captions
        .and_then(|c| c.tracklist)
        .map(|t| t.caption_tracks)
        .unwrap_or_default();

    if tracks.is_empty() {
        return Err(FetchError::TranscriptsDisabled(video_id.to_string()));
    }

    Ok(tracks)
}

fn check_playability(status: &PlayabilityStatus, video_id: &VideoId) -> Result<(), FetchError> {
    let reason = status.reason.as_deref().unwrap_or("");
    match status.status.as_str() {
        "" | "OK" => Ok(()),
        "ERROR" if reason.contains("unavailable") => {
            Err(FetchError::VideoUnavailable(video_id.to_string()))
        }
        "LOGIN_REQUIRED" if reason.contains("not a bot") => Err(FetchError::Unknown(format!(
            "request for video '{video_id}' was blocked: {reason}"
        ))),
        "LOGIN_REQUIRED" if reason.contains("inappropriate") => Err(FetchError::Unknown(
            format!("video '{video_id}' is age restricted"),
        )),
        other => Err(FetchError::Unknown(format!(
            "video '{video_id}' is unplayable ({other}): {reason}"
        ))),
    }
}

/// Pick the best track for the preferred languages.
///
/// For each language in order we take a manually created track before an auto-generated one.
pub(super) fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|lang| {
        let mut candidates = tracks.iter().filter(|t| &t.language_code == lang);
        let manual = candidates.clone().find(|t| !t.is_generated());
        manual.or_else(|| candidates.next())
    })
}
