use std::io::Write;

use crate::Result;
use crate::caption::CaptionEntry;
use crate::caption_encoder::CaptionEncoder;

/// Whitespace layout for [`JsonArrayEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    /// No whitespace between tokens: `[{"text":"hi","start":0.0,"duration":1.0}]`.
    Compact,

    /// One element per block, indented by two spaces per nesting level.
    Pretty,
}

/// A `CaptionEncoder` that writes entries as a single JSON array.
///
/// Design:
/// - We stream output directly to a `Write` implementation to avoid building the whole
///   document in memory.
/// - The encoder is stateful so we can emit a well-formed JSON array incrementally.
///
/// Example output (`JsonStyle::Pretty`):
/// ```json
/// [
///   {
///     "text": "hello",
///     "start": 0.0,
///     "duration": 1.2
///   }
/// ]
/// ```
pub struct JsonArrayEncoder<W: Write> {
    /// The underlying writer we stream JSON into.
    w: W,

    style: JsonStyle,

    /// Whether we have written the opening `[` of the JSON array.
    started: bool,

    /// Whether the next element will be the first element in the array.
    /// This lets us correctly place commas between elements.
    first: bool,

    /// Whether the encoder has been closed.
    /// Once closed, no further writes are allowed.
    closed: bool,
}

impl<W: Write> JsonArrayEncoder<W> {
    /// Create a new JSON array encoder that writes to the given writer.
    ///
    /// The JSON array is opened lazily on the first write or on close.
    pub fn new(w: W, style: JsonStyle) -> Self {
        Self {
            w,
            style,
            started: false,
            first: true,
            closed: false,
        }
    }

    /// Write the opening `[` of the JSON array if we have not already done so.
    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }

    /// Write one element nested one level deep inside the array.
    fn write_pretty(&mut self, entry: &CaptionEntry) -> Result<()> {
        let sep: &[u8] = if self.first { b"\n" } else { b",\n" };
        self.w.write_all(sep)?;

        // serde_json's pretty printer already uses two-space indentation; we only shift the
        // whole object right by one level. String values never contain raw newlines, so
        // splitting on lines is safe.
        let body = serde_json::to_string_pretty(entry)?;
        for (i, line) in body.lines().enumerate() {
            if i > 0 {
                self.w.write_all(b"\n")?;
            }
            self.w.write_all(b"  ")?;
            self.w.write_all(line.as_bytes())?;
        }
        Ok(())
    }
}

impl<W: Write> CaptionEncoder for JsonArrayEncoder<W> {
    /// Serialize a single entry and append it to the JSON array.
    fn write_entry(&mut self, entry: &CaptionEntry) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write entry: encoder is already closed",
            ));
        }

        // Ensure the JSON array has been started.
        self.start_if_needed()?;

        match self.style {
            JsonStyle::Compact => {
                // Write a comma before every element except the first.
                if !self.first {
                    self.w.write_all(b",")?;
                }
                serde_json::to_writer(&mut self.w, entry)?;
            }
            JsonStyle::Pretty => self.write_pretty(entry)?,
        }
        self.first = false;

        Ok(())
    }

    /// Finalize the JSON array and flush the underlying writer.
    ///
    /// This method is idempotent:
    /// - Calling `close()` multiple times is safe.
    /// - After closing, no further entries may be written.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        // Ensure we still output a valid JSON array even if no entries were written.
        self.start_if_needed()?;

        if self.style == JsonStyle::Pretty && !self.first {
            self.w.write_all(b"\n")?;
        }
        self.w.write_all(b"]")?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}
