use std::io::{self, BufWriter, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;

use tubescript::{
    FormatType, ProviderConfig, TranscriptService, YouTubeProvider, resolve_video_url,
    write_transcript,
};

#[tokio::main]
async fn main() -> Result<()> {
    let params = get_params()?;
    tubescript::init_logging(params.log_level);

    let video_id = resolve_video_url(Some(params.url.as_str()))?;

    let config = ProviderConfig {
        languages: params.languages,
        request_timeout: Duration::from_secs(params.timeout_secs),
    };
    let provider = YouTubeProvider::new(&config).context("failed to initialize YouTube provider")?;
    let service = TranscriptService::new(provider);

    let transcript = service
        .fetch(&video_id)
        .await
        .with_context(|| format!("failed to fetch transcript for '{video_id}'"))?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_transcript(&transcript, params.format, &mut writer)?;

    // Text and JSON don't end with a newline; keep the shell prompt on its own line.
    if params.format != FormatType::Srt {
        writeln!(writer)?;
    }
    writer.flush()?;

    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "tubescript")]
#[command(about = "Print the transcript of a YouTube video")]
struct Params {
    /// YouTube URL (watch, youtu.be, embed, shorts, or live link).
    #[arg(short = 'u', long = "url")]
    pub url: String,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = FormatType::Txt
    )]
    pub format: FormatType,

    /// Preferred caption languages, most preferred first.
    #[arg(
        short = 'l',
        long = "language",
        value_delimiter = ',',
        default_value = "en"
    )]
    pub languages: Vec<String>,

    #[arg(long = "timeout-secs", default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long = "log-level", default_value = "error")]
    pub log_level: LevelFilter,
}

fn get_params() -> Result<Params> {
    Ok(Params::parse())
}
