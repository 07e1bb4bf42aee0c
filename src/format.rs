//! Rendering a [`Transcript`] into one of the supported output formats.
//!
//! Formatting is a pure function of the transcript and the format: no I/O beyond the
//! caller's writer, no shared state, and the same input always renders the same bytes.

use std::io::Write;

use crate::Result;
use crate::caption::Transcript;
use crate::caption_encoder::CaptionEncoder;
use crate::format_type::FormatType;
use crate::json_array_encoder::{JsonArrayEncoder, JsonStyle};
use crate::srt_encoder::SrtEncoder;
use crate::text_encoder::TextEncoder;

/// Render `transcript` as a `String` in the requested format.
pub fn format_transcript(transcript: &Transcript, format: FormatType) -> Result<String> {
    let mut out = Vec::new();
    write_transcript(transcript, format, &mut out)?;
    Ok(String::from_utf8(out)?)
}

/// Stream `transcript` into `w` in the requested format.
pub fn write_transcript<W: Write>(transcript: &Transcript, format: FormatType, w: W) -> Result<()> {
    // We keep this explicit (no trait objects) so each encoder is monomorphized.
    match format {
        FormatType::Txt => encode_all(transcript, TextEncoder::new(w)),
        FormatType::Srt => encode_all(transcript, SrtEncoder::new(w)),
        FormatType::JsonPretty => encode_all(transcript, JsonArrayEncoder::new(w, JsonStyle::Pretty)),
        FormatType::Json => encode_all(transcript, JsonArrayEncoder::new(w, JsonStyle::Compact)),
    }
}

fn encode_all<E: CaptionEncoder>(transcript: &Transcript, mut encoder: E) -> Result<()> {
    let run_res = transcript
        .entries()
        .iter()
        .try_for_each(|entry| encoder.write_entry(entry));
    merge_run_and_close(run_res, encoder.close())
}

fn merge_run_and_close(run_res: Result<()>, close_res: Result<()>) -> Result<()> {
    match (run_res, close_res) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(close_err)) => Err(close_err),
        (Err(err), _) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::CaptionEntry;

    fn sample() -> Transcript {
        Transcript::new(vec![
            CaptionEntry::new("Never gonna give you up", 0.0, 2.5),
            CaptionEntry::new("Never gonna let you down", 2.5, 2.25),
            CaptionEntry::new("Never gonna run around", 3661.0, 0.5),
        ])
    }

    #[test]
    fn empty_transcript_renders_for_every_format() -> anyhow::Result<()> {
        let empty = Transcript::default();
        assert_eq!(format_transcript(&empty, FormatType::Txt)?, "");
        assert_eq!(format_transcript(&empty, FormatType::Srt)?, "");
        assert_eq!(format_transcript(&empty, FormatType::JsonPretty)?, "[]");
        assert_eq!(format_transcript(&empty, FormatType::Json)?, "[]");
        Ok(())
    }

    #[test]
    fn txt_joins_text_in_order() -> anyhow::Result<()> {
        assert_eq!(
            format_transcript(&sample(), FormatType::Txt)?,
            "Never gonna give you up\nNever gonna let you down\nNever gonna run around"
        );
        Ok(())
    }

    #[test]
    fn srt_has_one_numbered_block_per_entry() -> anyhow::Result<()> {
        let t = sample();
        let s = format_transcript(&t, FormatType::Srt)?;

        let blocks: Vec<&str> = s.split_terminator("\n\n").collect();
        assert_eq!(blocks.len(), t.len());
        for (i, block) in blocks.iter().enumerate() {
            let first_line = block.lines().next().unwrap_or_default();
            assert_eq!(first_line, (i + 1).to_string());
        }
        assert!(s.contains("3\n01:01:01,000 --> 01:01:01,500\nNever gonna run around\n\n"));
        Ok(())
    }

    #[test]
    fn json_formats_round_trip_all_fields() -> anyhow::Result<()> {
        let t = sample();
        for format in [FormatType::Json, FormatType::JsonPretty] {
            let s = format_transcript(&t, format)?;
            let parsed: Transcript = serde_json::from_str(&s)?;
            assert_eq!(parsed, t);
        }

        let compact = format_transcript(&t, FormatType::Json)?;
        assert!(!compact.contains('\n'));
        assert!(!compact.contains(": "));
        Ok(())
    }

    #[test]
    fn formatting_is_deterministic() -> anyhow::Result<()> {
        let t = sample();
        for format in [
            FormatType::Txt,
            FormatType::Srt,
            FormatType::JsonPretty,
            FormatType::Json,
        ] {
            assert_eq!(format_transcript(&t, format)?, format_transcript(&t, format)?);
        }
        Ok(())
    }
}
