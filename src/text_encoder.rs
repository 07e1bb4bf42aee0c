use std::io::Write;

use crate::Result;
use crate::caption::CaptionEntry;
use crate::caption_encoder::CaptionEncoder;

/// A `CaptionEncoder` that writes only caption text, joined by newlines.
///
/// There is no trailing newline after the last entry, so an empty transcript produces an
/// empty string and a single entry produces exactly its text.
pub struct TextEncoder<W: Write> {
    w: W,

    /// Whether the next entry is the first one (no separator before it).
    first: bool,

    closed: bool,
}

impl<W: Write> TextEncoder<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            first: true,
            closed: false,
        }
    }
}

impl<W: Write> CaptionEncoder for TextEncoder<W> {
    fn write_entry(&mut self, entry: &CaptionEntry) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write entry: encoder is already closed",
            ));
        }

        if !self.first {
            self.w.write_all(b"\n")?;
        }
        self.first = false;

        self.w.write_all(entry.text.as_bytes())?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_joins_entries_with_newlines() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = TextEncoder::new(&mut out);
        enc.write_entry(&CaptionEntry::new("first", 0.0, 1.0))?;
        enc.write_entry(&CaptionEntry::new("second", 1.0, 1.0))?;
        enc.write_entry(&CaptionEntry::new("third", 2.0, 1.0))?;
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "first\nsecond\nthird");
        Ok(())
    }

    #[test]
    fn text_empty_transcript_is_empty_string() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = TextEncoder::new(&mut out);
        enc.close()?;
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "");
        Ok(())
    }

    #[test]
    fn text_write_after_close_errors() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = TextEncoder::new(&mut out);
        enc.close()?;
        let err = enc
            .write_entry(&CaptionEntry::new("nope", 0.0, 1.0))
            .unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }
}
