use std::collections::HashMap;

use tubescript::{
    Availability, CaptionEntry, Error, FetchError, FormatType, Transcript, TranscriptProvider,
    TranscriptService, VideoId,
};

/// In-memory provider keyed by video id. Unknown ids report `VideoUnavailable`.
#[derive(Default)]
struct FakeProvider {
    videos: HashMap<String, Result<Transcript, FetchError>>,
}

impl FakeProvider {
    fn with(mut self, id: &str, outcome: Result<Transcript, FetchError>) -> Self {
        self.videos.insert(id.to_owned(), outcome);
        self
    }

    fn outcome(&self, video_id: &VideoId) -> Result<Transcript, FetchError> {
        self.videos
            .get(video_id.as_str())
            .cloned()
            .unwrap_or_else(|| Err(FetchError::VideoUnavailable(video_id.to_string())))
    }
}

impl TranscriptProvider for FakeProvider {
    async fn fetch(&self, video_id: &VideoId) -> Result<Transcript, FetchError> {
        self.outcome(video_id)
    }

    async fn check_availability(&self, video_id: &VideoId) -> Result<(), FetchError> {
        self.outcome(video_id).map(|_| ())
    }
}

fn rick() -> Transcript {
    Transcript::new(vec![
        CaptionEntry::new("We're no strangers to love", 18.64, 3.24),
        CaptionEntry::new("You know the rules and so do I", 22.64, 4.32),
    ])
}

fn service() -> TranscriptService<FakeProvider> {
    TranscriptService::new(
        FakeProvider::default()
            .with("dQw4w9WgXcQ", Ok(rick()))
            .with("emptyvideo1", Ok(Transcript::default()))
            .with(
                "noscript001",
                Err(FetchError::NoTranscriptFound("noscript001".to_owned())),
            )
            .with(
                "disabled001",
                Err(FetchError::TranscriptsDisabled("disabled001".to_owned())),
            )
            .with("explodes001", Err(FetchError::Unknown("connection reset".to_owned()))),
    )
}

#[tokio::test]
async fn renders_plain_text_from_watch_url() -> anyhow::Result<()> {
    let rendered = service()
        .transcript(
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            FormatType::Txt,
        )
        .await?;

    assert_eq!(rendered.video_id.as_str(), "dQw4w9WgXcQ");
    assert_eq!(rendered.content_type(), "text/plain; charset=utf-8");
    assert_eq!(
        rendered.body,
        "We're no strangers to love\nYou know the rules and so do I"
    );
    Ok(())
}

#[tokio::test]
async fn renders_srt_from_short_link() -> anyhow::Result<()> {
    let rendered = service()
        .transcript(Some("https://youtu.be/dQw4w9WgXcQ"), FormatType::Srt)
        .await?;

    assert_eq!(
        rendered.body,
        "1\n00:00:18,640 --> 00:00:21,880\nWe're no strangers to love\n\n\
         2\n00:00:22,640 --> 00:00:26,960\nYou know the rules and so do I\n\n"
    );
    Ok(())
}

#[tokio::test]
async fn renders_json_variants() -> anyhow::Result<()> {
    let svc = service();
    let url = Some("https://youtu.be/dQw4w9WgXcQ");

    let pretty = svc.transcript(url, FormatType::JsonPretty).await?;
    assert_eq!(pretty.content_type(), "application/json");
    assert!(pretty.body.starts_with("[\n  {\n    \"text\": "));
    assert_eq!(serde_json::from_str::<Transcript>(&pretty.body)?, rick());

    let compact = svc.transcript(url, FormatType::Json).await?;
    assert_eq!(compact.content_type(), "application/json");
    assert!(!compact.body.contains('\n'));
    assert_eq!(serde_json::from_str::<Transcript>(&compact.body)?, rick());
    Ok(())
}

#[tokio::test]
async fn empty_transcript_renders_empty_text() -> anyhow::Result<()> {
    let rendered = service()
        .transcript(Some("https://youtu.be/emptyvideo1"), FormatType::Txt)
        .await?;
    assert_eq!(rendered.body, "");
    Ok(())
}

#[tokio::test]
async fn invalid_url_never_reaches_provider() {
    let err = service()
        .transcript(Some("not a url"), FormatType::Txt)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(ref m) if m == "Invalid YouTube URL"));
}

#[tokio::test]
async fn missing_url_is_invalid_input() {
    let err = service().transcript(None, FormatType::Json).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(ref m) if m == "No video URL provided"));
}

#[tokio::test]
async fn provider_failures_keep_their_kind() {
    let svc = service();
    let cases = [
        ("https://youtu.be/noscript001", "no_transcript"),
        ("https://youtu.be/disabled001", "disabled"),
        ("https://youtu.be/gone0000001", "unavailable"),
        ("https://youtu.be/explodes001", "unknown"),
    ];

    for (url, kind) in cases {
        match svc.transcript(Some(url), FormatType::Txt).await {
            Err(Error::Fetch(err)) => assert_eq!(err.kind(), kind, "url: {url}"),
            other => panic!("expected fetch error for {url}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn check_reports_availability() -> anyhow::Result<()> {
    let svc = service();

    let yes = svc.check(Some("https://youtu.be/dQw4w9WgXcQ")).await?;
    assert_eq!(
        yes,
        Availability {
            available: true,
            message: "Transcript is available".to_owned(),
        }
    );

    for url in [
        "https://youtu.be/noscript001",
        "https://youtu.be/disabled001",
        "https://youtu.be/gone0000001",
    ] {
        let no = svc.check(Some(url)).await?;
        assert!(!no.available, "url: {url}");
        assert_eq!(no.message, "Transcript is not available for this video");
    }
    Ok(())
}

#[tokio::test]
async fn check_surfaces_unexpected_failures() {
    let err = service()
        .check(Some("https://youtu.be/explodes001"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::Unknown(_))));
}
