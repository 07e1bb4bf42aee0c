use std::io::Write;

use crate::Result;
use crate::caption::CaptionEntry;
use crate::caption_encoder::CaptionEncoder;
use crate::timestamp::format_time;

/// A `CaptionEncoder` that writes entries as a SubRip (SRT) subtitle track.
///
/// Each entry becomes one numbered block:
///
/// ```text
/// 1
/// 00:00:00,000 --> 00:00:01,500
/// hello
///
/// ```
///
/// Unlike WebVTT there is no file header, so an empty transcript produces no output at all.
pub struct SrtEncoder<W: Write> {
    /// The underlying writer we stream SRT into.
    w: W,

    /// 1-based index of the next block.
    next_index: usize,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    /// Create a new SRT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            next_index: 1,
            closed: false,
        }
    }
}

impl<W: Write> CaptionEncoder for SrtEncoder<W> {
    /// Write a single numbered subtitle block.
    fn write_entry(&mut self, entry: &CaptionEntry) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write entry: encoder is already closed",
            ));
        }

        let start = format_time(entry.start);
        let end = format_time(entry.end());

        writeln!(&mut self.w, "{}", self.next_index)?;
        writeln!(&mut self.w, "{start} --> {end}")?;

        // Cue text is written verbatim; multi-line captions stay multi-line.
        writeln!(&mut self.w, "{}", entry.text)?;

        // Blank line separates blocks.
        writeln!(&mut self.w)?;

        self.next_index += 1;
        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}
