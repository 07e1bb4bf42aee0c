use std::future::Future;

use crate::caption::Transcript;
use crate::error::FetchError;
use crate::video_id::VideoId;

/// Pluggable caption source used by [`crate::TranscriptService`].
///
/// A provider turns a video identifier into an ordered [`Transcript`]. Failures are reported
/// as a [`FetchError`] kind rather than through a generic error, so callers can map each kind
/// to a distinct response.
///
/// Implementations make a single attempt per call; retries and caching are out of scope.
pub trait TranscriptProvider: Send + Sync {
    /// Retrieve the transcript for `video_id`.
    fn fetch(
        &self,
        video_id: &VideoId,
    ) -> impl Future<Output = Result<Transcript, FetchError>> + Send;

    /// Check whether any transcript exists for `video_id` without downloading it.
    ///
    /// Reports the same failure kinds as [`TranscriptProvider::fetch`].
    fn check_availability(
        &self,
        video_id: &VideoId,
    ) -> impl Future<Output = Result<(), FetchError>> + Send;
}
