use crate::Result;
use crate::caption::CaptionEntry;

/// Streams caption entries into some output format.
///
/// Callers write entries in transcript order and then call `close` exactly once they are
/// done. `close` must be idempotent, and writing after `close` is an error.
pub trait CaptionEncoder {
    fn write_entry(&mut self, entry: &CaptionEntry) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
