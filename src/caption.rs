use serde::{Deserialize, Serialize};

/// One timed line of transcript text.
///
/// Serialized field names and order (`text`, `start`, `duration`) are part of the JSON output
/// format and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    /// How long the caption stays on screen, in seconds.
    pub duration: f64,
}

impl CaptionEntry {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End offset in seconds (`start + duration`).
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// The ordered caption entries for one video, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<CaptionEntry>);

impl Transcript {
    pub fn new(entries: Vec<CaptionEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[CaptionEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first `n` entries (or fewer, if the transcript is shorter).
    pub fn head(&self, n: usize) -> &[CaptionEntry] {
        &self.0[..n.min(self.0.len())]
    }
}

impl From<Vec<CaptionEntry>> for Transcript {
    fn from(entries: Vec<CaptionEntry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<CaptionEntry> for Transcript {
    fn from_iter<I: IntoIterator<Item = CaptionEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a CaptionEntry;
    type IntoIter = std::slice::Iter<'a, CaptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
