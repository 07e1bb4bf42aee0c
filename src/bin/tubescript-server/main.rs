use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing::{Level, error, info};

mod api;
mod metrics;

use api::AppState;
use tubescript::{ProviderConfig, ServerConfig, TranscriptService, YouTubeProvider};

#[derive(Parser, Debug)]
#[command(name = "tubescript-server")]
#[command(about = "HTTP server that fetches and reformats YouTube transcripts")]
struct Params {
    /// Host interface to bind to.
    #[arg(long = "host", env = "TUBESCRIPT_HOST", default_value = "0.0.0.0")]
    host: String,

    /// TCP port to listen on.
    #[arg(long = "port", env = "PORT", default_value_t = 5001)]
    port: u16,

    /// Default log level (`TUBESCRIPT_LOG` overrides it with a full filter).
    #[arg(long = "log-level", env = "TUBESCRIPT_LOG_LEVEL", default_value = "info")]
    log_level: LevelFilter,

    /// Allowed CORS origins, comma separated. `*` allows any origin.
    #[arg(
        long = "cors-origin",
        env = "TUBESCRIPT_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    cors_origins: Vec<String>,

    /// Preferred caption languages, most preferred first.
    #[arg(
        long = "language",
        env = "TUBESCRIPT_LANGUAGES",
        value_delimiter = ',',
        default_value = "en"
    )]
    languages: Vec<String>,

    /// Timeout for each request to YouTube (seconds).
    #[arg(long = "request-timeout-secs", default_value_t = 30)]
    request_timeout_secs: u64,
}

impl Params {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            log_level: self.log_level,
            cors_origins: self.cors_origins.clone(),
        }
    }

    fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            languages: self.languages.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() {
    let params = Params::parse();
    let config = params.server_config();
    tubescript::init_logging(config.log_level);

    if let Err(err) = run(&config, &params.provider_config()).await {
        error!(error = ?err, "tubescript-server failed");
        std::process::exit(1);
    }
}

async fn run(config: &ServerConfig, provider_config: &ProviderConfig) -> Result<()> {
    metrics::init();

    let addr = config.bind_addr().context("invalid host/port bind address")?;

    let provider =
        YouTubeProvider::new(provider_config).context("failed to initialize YouTube provider")?;
    let state = AppState::new(TranscriptService::new(provider));

    let app = api::router(state, config).layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(false),
            )
            .on_response(DefaultOnResponse::new().level(Level::INFO))
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    );

    let listener = TcpListener::bind(addr).await.context("bind failed")?;
    info!(%addr, languages = ?provider_config.languages, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = ?err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
