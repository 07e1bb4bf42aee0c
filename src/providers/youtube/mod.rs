use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::caption::Transcript;
use crate::config::ProviderConfig;
use crate::error::FetchError;
use crate::provider::TranscriptProvider;
use crate::video_id::VideoId;
use crate::{Error, Result};

mod innertube;
mod json3;

use innertube::{CaptionTrack, caption_tracks, consent_cookie, extract_api_key, is_consent_page};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const INNERTUBE_PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player?key=";

/// InnerTube client identity sent with player requests. The Android client still receives
/// caption track URLs that don't require a proof-of-origin token.
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

/// Built-in provider that scrapes YouTube's watch page and InnerTube player API.
///
/// One `fetch` makes up to four requests: watch page (plus a retry if YouTube answers with
/// its cookie consent page), player metadata, and the caption track itself.
#[derive(Debug, Clone)]
pub struct YouTubeProvider {
    client: Client,
    languages: Vec<String>,
}

impl YouTubeProvider {
    /// Build a provider with its own HTTP client.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        if config.languages.is_empty() {
            return Err(Error::invalid_input(
                "at least one caption language must be configured",
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| Error::msg(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            languages: config.languages.clone(),
        })
    }

    /// Preferred caption languages, most preferred first.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    async fn list_tracks(
        &self,
        video_id: &VideoId,
    ) -> std::result::Result<Vec<CaptionTrack>, FetchError> {
        let html = self.fetch_watch_html(video_id).await?;
        let api_key = extract_api_key(&html, video_id)?;
        let body = self.fetch_player(video_id, &api_key).await?;
        caption_tracks(&body, video_id)
    }

    async fn fetch_watch_html(
        &self,
        video_id: &VideoId,
    ) -> std::result::Result<String, FetchError> {
        let url = format!("{WATCH_URL}{video_id}");
        debug!(%video_id, "fetching watch page");

        let html = self.get_text(&url, None, video_id).await?;
        if !is_consent_page(&html) {
            return Ok(html);
        }

        // EU visitors get a consent interstitial first; accept it once and retry.
        let cookie = consent_cookie(&html).ok_or_else(|| {
            FetchError::Unknown(format!("failed to accept cookie consent for video '{video_id}'"))
        })?;
        let html = self.get_text(&url, Some(&cookie), video_id).await?;
        if is_consent_page(&html) {
            return Err(FetchError::Unknown(format!(
                "failed to accept cookie consent for video '{video_id}'"
            )));
        }
        Ok(html)
    }

    async fn fetch_player(
        &self,
        video_id: &VideoId,
        api_key: &str,
    ) -> std::result::Result<String, FetchError> {
        let payload = serde_json::json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": video_id.as_str(),
        });
        debug!(%video_id, "fetching player response");

        let response = self
            .client
            .post(format!("{INNERTUBE_PLAYER_URL}{api_key}"))
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .send()
            .await
            .map_err(|err| FetchError::Unknown(format!("player request failed: {err}")))?;

        read_body(response, video_id).await
    }

    async fn fetch_track(
        &self,
        video_id: &VideoId,
        track: &CaptionTrack,
    ) -> std::result::Result<Transcript, FetchError> {
        // Tracks flagged `exp=xpe` need a proof-of-origin token we cannot produce.
        if track.base_url.contains("&exp=xpe") {
            return Err(FetchError::Unknown(format!(
                "caption track for video '{video_id}' requires a proof-of-origin token"
            )));
        }

        debug!(
            %video_id,
            language = %track.language_code,
            generated = track.is_generated(),
            "fetching caption track"
        );
        let body = self
            .get_text(&json3::track_url(&track.base_url), None, video_id)
            .await?;
        json3::parse_track(&body)
    }

    async fn get_text(
        &self,
        url: &str,
        cookie: Option<&str>,
        video_id: &VideoId,
    ) -> std::result::Result<String, FetchError> {
        let mut request = self.client.get(url);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|err| FetchError::Unknown(format!("request to YouTube failed: {err}")))?;

        read_body(response, video_id).await
    }
}

async fn read_body(
    response: Response,
    video_id: &VideoId,
) -> std::result::Result<String, FetchError> {
    check_status(response.status(), video_id)?;
    response
        .text()
        .await
        .map_err(|err| FetchError::Unknown(format!("failed to read YouTube response: {err}")))
}

fn check_status(status: StatusCode, video_id: &VideoId) -> std::result::Result<(), FetchError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(FetchError::VideoUnavailable(video_id.to_string())),
        StatusCode::TOO_MANY_REQUESTS => Err(FetchError::Unknown(
            "YouTube is rate limiting requests from this IP".to_owned(),
        )),
        s => Err(FetchError::Unknown(format!("YouTube responded with HTTP {s}"))),
    }
}

impl TranscriptProvider for YouTubeProvider {
    async fn fetch(&self, video_id: &VideoId) -> std::result::Result<Transcript, FetchError> {
        let tracks = self.list_tracks(video_id).await?;
        let track = innertube::select_track(&tracks, &self.languages)
            .ok_or_else(|| FetchError::NoTranscriptFound(video_id.to_string()))?;
        self.fetch_track(video_id, track).await
    }

    async fn check_availability(&self, video_id: &VideoId) -> std::result::Result<(), FetchError> {
        self.list_tracks(video_id).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_language_list() {
        let config = ProviderConfig {
            languages: Vec::new(),
            ..ProviderConfig::default()
        };
        let err = YouTubeProvider::new(&config).unwrap_err();
        assert!(err.to_string().contains("caption language"));
    }

    #[test]
    fn keeps_configured_languages() -> anyhow::Result<()> {
        let config = ProviderConfig {
            languages: vec!["de".to_owned(), "en".to_owned()],
            ..ProviderConfig::default()
        };
        let provider = YouTubeProvider::new(&config)?;
        assert_eq!(provider.languages(), &["de".to_owned(), "en".to_owned()]);
        Ok(())
    }

    #[test]
    fn status_mapping() {
        let vid = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert!(check_status(StatusCode::OK, &vid).is_ok());
        assert!(matches!(
            check_status(StatusCode::NOT_FOUND, &vid),
            Err(FetchError::VideoUnavailable(_))
        ));
        assert!(matches!(
            check_status(StatusCode::TOO_MANY_REQUESTS, &vid),
            Err(FetchError::Unknown(_))
        ));
        assert!(matches!(
            check_status(StatusCode::BAD_GATEWAY, &vid),
            Err(FetchError::Unknown(_))
        ));
    }
}
