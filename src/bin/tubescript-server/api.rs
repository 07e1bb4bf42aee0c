use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use tubescript::{
    Error, FetchError, FormatType, ServerConfig, TranscriptProvider, TranscriptService, VideoId,
};

use crate::metrics;

/// Entries returned by the diagnostic transcript endpoint.
const PREVIEW_ENTRIES: usize = 5;

/// `format` used when the query string doesn't name one.
const DEFAULT_FORMAT: &str = "json";

pub struct AppState<P> {
    service: TranscriptService<P>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<P: TranscriptProvider> AppState<P> {
    pub fn new(service: TranscriptService<P>) -> Self {
        Self { service }
    }
}

#[derive(Debug, Deserialize)]
pub struct TranscriptQuery {
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    #[serde(default)]
    video_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    details: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details,
        }
    }

    fn unexpected(details: String) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An unexpected error occurred",
            Some(details),
        )
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(message) => Self::new(StatusCode::BAD_REQUEST, message, None),
            Error::Fetch(FetchError::NoTranscriptFound(_)) => Self::new(
                StatusCode::NOT_FOUND,
                "No transcript found for this video",
                Some("The video does not have any available transcripts.".to_owned()),
            ),
            Error::Fetch(FetchError::TranscriptsDisabled(_)) => Self::new(
                StatusCode::FORBIDDEN,
                "Transcripts are disabled for this video",
                Some("The video owner has disabled transcripts for this content.".to_owned()),
            ),
            Error::Fetch(FetchError::VideoUnavailable(_)) => Self::new(
                StatusCode::NOT_FOUND,
                "The video is unavailable",
                Some(
                    "The requested video could not be accessed. It might be private or deleted."
                        .to_owned(),
                ),
            ),
            Error::Fetch(FetchError::Unknown(message)) => Self::unexpected(message),
            other => Self::unexpected(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.error,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

/// All application routes. HTTP metrics and CORS apply to the `/api` routes only.
pub fn router<P>(state: AppState<P>, config: &ServerConfig) -> Router
where
    P: TranscriptProvider + 'static,
{
    let api = Router::new()
        .route("/transcript", get(transcript::<P>))
        .route("/check-transcript", get(check_transcript::<P>))
        .route("/test", get(test))
        .route("/test-transcript/{video_id}", get(test_transcript::<P>))
        .route_layer(from_fn(metrics::track_http_metrics))
        .layer(cors_layer(config));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics::prometheus_metrics))
        .nest("/api", api)
        .with_state(state)
}

/// CORS policy for the configured origins. A `*` entry allows any origin.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .max_age(Duration::from_secs(600));

    if config.allows_any_origin() {
        return layer.allow_origin(Any).allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| o.trim().parse().ok())
        .collect();

    layer
        .allow_origin(origins)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
}

async fn healthz() -> &'static str {
    "ok"
}

async fn transcript<P: TranscriptProvider>(
    State(state): State<AppState<P>>,
    Query(query): Query<TranscriptQuery>,
) -> Result<Response, ApiError> {
    let format_raw = query.format.as_deref().unwrap_or(DEFAULT_FORMAT);
    info!(video_url = ?query.video_url, format = format_raw, "transcript requested");

    let format = FormatType::from_query(format_raw);
    let result = state.service.transcript(query.video_url.as_deref(), format).await;
    record_outcome(&result);
    let rendered = result?;

    let content_type = HeaderValue::from_static(rendered.content_type());
    Ok(([(header::CONTENT_TYPE, content_type)], rendered.body).into_response())
}

async fn check_transcript<P: TranscriptProvider>(
    State(state): State<AppState<P>>,
    Query(query): Query<CheckQuery>,
) -> Result<Response, ApiError> {
    let availability = state.service.check(query.video_url.as_deref()).await?;
    Ok(Json(availability).into_response())
}

async fn test() -> Response {
    Json(json!({ "message": "Backend is working" })).into_response()
}

/// Diagnostic: fetch by raw identifier and return the first few entries.
async fn test_transcript<P: TranscriptProvider>(
    State(state): State<AppState<P>>,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(video_id) = VideoId::parse(&raw_id) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Invalid video ID" })),
        )
            .into_response();
    };
    let body = match state.service.fetch(&video_id).await {
        Ok(transcript) => json!({
            "success": true,
            "transcript": transcript.head(PREVIEW_ENTRIES),
        }),
        Err(err) => {
            error!(%video_id, error = %err, "diagnostic transcript fetch failed");
            json!({ "success": false, "error": err.to_string() })
        }
    };
    Json(body).into_response()
}

fn record_outcome<T>(result: &tubescript::Result<T>) {
    match result {
        Ok(_) => metrics::record_fetch("ok"),
        Err(Error::Fetch(err)) => metrics::record_fetch(err.kind()),
        // Input was rejected before any retrieval happened.
        Err(_) => {}
    }
}
