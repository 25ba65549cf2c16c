//! Session lifecycle tests against a scripted extraction engine — no network
//! access and no yt-dlp binary required.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vidloader::{
    DownloadOutcome, DownloadRequest, DownloadSession, ExtractionEngine, ExtractorOptions,
    MediaFormat, Quality, VideoMetadata, VidloaderError,
};

/// What the scripted engine should do when the session invokes it
enum Script {
    /// Write the given files into the destination directory, then succeed
    WriteFiles(Vec<(&'static str, &'static [u8])>),
    /// Report success without producing any file
    SucceedEmpty,
    /// Fail with the given engine message
    Fail(&'static str),
    /// Panic mid-call, simulating a fault inside the engine adapter
    Panic,
}

struct ScriptedEngine {
    script: Script,
    /// Destination directory observed on the last materialize call
    seen_dest: Mutex<Option<PathBuf>>,
    calls: AtomicUsize,
}

impl ScriptedEngine {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            seen_dest: Mutex::new(None),
            calls: AtomicUsize::new(0),
        })
    }

    fn sample_metadata() -> VideoMetadata {
        VideoMetadata {
            title: "My Video".to_string(),
            uploader: Some("Some Channel".to_string()),
            duration: Some(213.0),
            ..Default::default()
        }
    }

    fn seen_dest(&self) -> Option<PathBuf> {
        self.seen_dest.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionEngine for ScriptedEngine {
    fn id(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_metadata(
        &self,
        _url: &str,
        _options: &ExtractorOptions,
    ) -> Result<VideoMetadata, VidloaderError> {
        Ok(Self::sample_metadata())
    }

    async fn fetch_and_materialize(
        &self,
        _url: &str,
        _options: &ExtractorOptions,
        dest_dir: &Path,
    ) -> Result<VideoMetadata, VidloaderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_dest.lock().unwrap() = Some(dest_dir.to_path_buf());

        match &self.script {
            Script::WriteFiles(files) => {
                for (name, bytes) in files {
                    std::fs::write(dest_dir.join(name), bytes).expect("write fixture file");
                }
                Ok(Self::sample_metadata())
            }
            Script::SucceedEmpty => Ok(Self::sample_metadata()),
            Script::Fail(reason) => Err(VidloaderError::Extraction(reason.to_string())),
            Script::Panic => panic!("engine fault injected"),
        }
    }
}

fn youtube_request(quality: Quality, format: MediaFormat) -> DownloadRequest {
    DownloadRequest::new("https://www.youtube.com/watch?v=abc123", quality, format)
}

#[tokio::test]
async fn successful_download_returns_bytes_and_removes_workspace() {
    let engine = ScriptedEngine::new(Script::WriteFiles(vec![(
        "My Video.mp4",
        b"fake video content".as_slice(),
    )]));
    let session = DownloadSession::new(engine.clone());

    let outcome = session
        .run(&youtube_request(Quality::Best, MediaFormat::Mp4))
        .await;

    match outcome {
        DownloadOutcome::Success(file, metadata) => {
            assert_eq!(file.file_name, "My Video.mp4");
            assert_eq!(file.size_bytes, b"fake video content".len() as u64);
            assert_eq!(file.data, b"fake video content");
            assert_eq!(metadata.title, "My Video");
        }
        DownloadOutcome::Failure(e) => panic!("expected success, got {e}"),
    }

    let workspace = engine.seen_dest().expect("engine was invoked");
    assert!(!workspace.exists(), "workspace must be removed after run");
}

#[tokio::test]
async fn engine_failure_surfaces_reason_verbatim_and_removes_workspace() {
    let reason = "ERROR: [youtube] abc123: Video unavailable";
    let engine = ScriptedEngine::new(Script::Fail(reason));
    let session = DownloadSession::new(engine.clone());

    let outcome = session
        .run(&youtube_request(Quality::P720, MediaFormat::Mp4))
        .await;

    match outcome {
        DownloadOutcome::Failure(VidloaderError::Extraction(msg)) => assert_eq!(msg, reason),
        other => panic!("expected extraction failure, got {other:?}"),
    }

    let workspace = engine.seen_dest().expect("engine was invoked");
    assert!(!workspace.exists());
}

#[tokio::test]
async fn silent_engine_success_without_artifact_is_a_distinct_failure() {
    let engine = ScriptedEngine::new(Script::SucceedEmpty);
    let session = DownloadSession::new(engine.clone());

    let outcome = session
        .run(&youtube_request(Quality::Best, MediaFormat::Mp4))
        .await;

    match outcome {
        DownloadOutcome::Failure(e) => {
            assert!(matches!(e, VidloaderError::NoMediaFile));
            assert_eq!(e.to_string(), "No file found after download");
        }
        DownloadOutcome::Success(..) => panic!("expected post-condition failure"),
    }

    let workspace = engine.seen_dest().expect("engine was invoked");
    assert!(!workspace.exists());
}

#[tokio::test]
async fn fault_during_engine_call_still_removes_workspace() {
    let engine = ScriptedEngine::new(Script::Panic);
    let session = DownloadSession::new(engine.clone());
    let request = youtube_request(Quality::Best, MediaFormat::Mp4);

    let handle = tokio::spawn(async move { session.run(&request).await });
    let join_result = handle.await;
    assert!(join_result.unwrap_err().is_panic());

    let workspace = engine.seen_dest().expect("engine was invoked");
    assert!(
        !workspace.exists(),
        "workspace must be removed even when the engine call faults"
    );
}

#[tokio::test]
async fn unsupported_url_is_rejected_before_the_engine_runs() {
    let engine = ScriptedEngine::new(Script::SucceedEmpty);
    let session = DownloadSession::new(engine.clone());

    let request = DownloadRequest::new("https://example.com/video", Quality::Best, MediaFormat::Mp4);
    let outcome = session.run(&request).await;

    match outcome {
        DownloadOutcome::Failure(VidloaderError::UnsupportedUrl(url)) => {
            assert_eq!(url, "https://example.com/video");
        }
        other => panic!("expected unsupported-url failure, got {other:?}"),
    }
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn audio_request_picks_transcoded_file_over_raw_stream() {
    let engine = ScriptedEngine::new(Script::WriteFiles(vec![
        ("clip.webm", b"raw stream".as_slice()),
        ("clip.mp3", b"transcoded audio".as_slice()),
    ]));
    let session = DownloadSession::new(engine.clone());

    let outcome = session
        .run(&youtube_request(Quality::Best, MediaFormat::Mp3))
        .await;

    match outcome {
        DownloadOutcome::Success(file, _) => {
            assert_eq!(file.file_name, "clip.mp3");
            assert_eq!(file.data, b"transcoded audio");
        }
        DownloadOutcome::Failure(e) => panic!("expected success, got {e}"),
    }
}

#[tokio::test]
async fn concurrent_sessions_use_independent_workspaces() {
    let engine_a = ScriptedEngine::new(Script::WriteFiles(vec![("a.mp4", b"a".as_slice())]));
    let engine_b = ScriptedEngine::new(Script::WriteFiles(vec![("b.mp4", b"b".as_slice())]));
    let session_a = DownloadSession::new(engine_a.clone());
    let session_b = DownloadSession::new(engine_b.clone());

    let request_a = youtube_request(Quality::Best, MediaFormat::Mp4);
    let request_b = youtube_request(Quality::Best, MediaFormat::Mp4);
    let (outcome_a, outcome_b) = tokio::join!(
        session_a.run(&request_a),
        session_b.run(&request_b),
    );

    assert!(outcome_a.is_success());
    assert!(outcome_b.is_success());
    assert_ne!(engine_a.seen_dest(), engine_b.seen_dest());
}
