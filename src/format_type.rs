#[cfg(feature = "cli")]
use clap::ValueEnum;

/// The supported renderings of a fetched transcript.
///
/// Why this exists:
/// - The HTTP API selects the format with a free-form `format` query string, while the CLI
///   selects it with a flag. Both map onto this one enum.
/// - Each variant maps to a concrete `CaptionEncoder` implementation.
///
/// Parsing never fails: anything we don't recognize renders as compact JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
pub enum FormatType {
    /// Caption text only, one entry per line.
    Txt,

    /// SubRip subtitle track.
    Srt,

    /// JSON array with 2-space indentation.
    JsonPretty,

    /// JSON array without extraneous whitespace.
    #[default]
    Json,
}

impl FormatType {
    /// Map the API's `format` query value onto a format.
    ///
    /// `json` selects the indented rendering; unrecognized values fall back to compact JSON.
    pub fn from_query(raw: &str) -> Self {
        match raw {
            "txt" => Self::Txt,
            "srt" => Self::Srt,
            "json" => Self::JsonPretty,
            _ => Self::Json,
        }
    }

    /// MIME type to serve this format with.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Txt | Self::Srt => "text/plain; charset=utf-8",
            Self::JsonPretty | Self::Json => "application/json",
        }
    }
}
