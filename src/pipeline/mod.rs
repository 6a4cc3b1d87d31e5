use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use futures_util::future::join_all;
use tracing::{info, warn};
use uuid::Uuid;

pub mod artifact;
pub mod error;
pub mod publisher;
pub mod transcoder;

use self::artifact::{ArtifactRole, classify};
use self::error::PipelineError;
use self::publisher::ArtifactPublisher;
use self::transcoder::Transcoder;

/// One artifact that made it to the object store.
#[derive(Debug, Clone)]
pub struct PublishedArtifact {
    pub local_path: PathBuf,
    pub remote_url: String,
}

/// Drives one upload through transcode → classify → concurrent publish and
/// hands back the public playlist URL. The working directory is removed on
/// every exit path.
pub struct TrackPipeline {
    transcoder: Arc<dyn Transcoder>,
    publisher: Arc<dyn ArtifactPublisher>,
}

impl TrackPipeline {
    pub fn new(transcoder: Arc<dyn Transcoder>, publisher: Arc<dyn ArtifactPublisher>) -> Self {
        Self {
            transcoder,
            publisher,
        }
    }

    pub async fn run(
        &self,
        input_file: &Path,
        work_dir: &Path,
        track_id: Uuid,
    ) -> Result<String, PipelineError> {
        let result = self.process(input_file, work_dir, track_id).await;

        // A cleanup failure only becomes the job result when the job itself
        // succeeded; otherwise the primary error wins and we just log it.
        if let Err(e) = tokio::fs::remove_dir_all(work_dir).await {
            if result.is_ok() {
                return Err(PipelineError::Cleanup(e));
            }
            warn!(
                "Failed to remove working directory {}: {}",
                work_dir.display(),
                e
            );
        }

        result
    }

    async fn process(
        &self,
        input_file: &Path,
        work_dir: &Path,
        track_id: Uuid,
    ) -> Result<String, PipelineError> {
        info!("🎬 Transcoding {} for track {}", input_file.display(), track_id);
        self.transcoder.transcode(input_file, work_dir).await?;

        let artifacts = classify(work_dir)?;
        if artifacts.is_empty() {
            return Err(PipelineError::NoOutputProduced);
        }

        let manifest_path = {
            let mut manifests = artifacts
                .iter()
                .filter(|a| a.role == ArtifactRole::Manifest)
                .map(|a| a.local_path.clone());
            match (manifests.next(), manifests.next()) {
                (Some(path), None) => path,
                _ => return Err(PipelineError::ManifestNotFound),
            }
        };

        info!(
            "⬆️ Publishing {} artifacts for track {}",
            artifacts.len(),
            track_id
        );

        // Fan out one task per artifact. Siblings keep running when one
        // fails; the join below drains them all before the job settles.
        let mut keys = Vec::with_capacity(artifacts.len());
        let mut handles = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let publisher = Arc::clone(&self.publisher);
            let key = format!("music/{}/{}", track_id, artifact.file_name());
            keys.push(key.clone());
            handles.push(tokio::spawn(async move {
                let body = tokio::fs::read(&artifact.local_path).await?;
                let remote_url = publisher
                    .publish(Bytes::from(body), artifact.content_type(), &key)
                    .await?;
                Ok::<_, anyhow::Error>(PublishedArtifact {
                    local_path: artifact.local_path,
                    remote_url,
                })
            }));
        }

        let mut published = Vec::with_capacity(keys.len());
        let mut failures = Vec::new();
        for (key, joined) in keys.into_iter().zip(join_all(handles).await) {
            match joined {
                Ok(Ok(artifact)) => published.push(artifact),
                Ok(Err(e)) => failures.push((key, e)),
                Err(e) => failures.push((key, anyhow::Error::from(e))),
            }
        }

        if !failures.is_empty() {
            let failed_keys = failures.iter().map(|(k, _)| k.clone()).collect();
            let (_, source) = failures.swap_remove(0);
            return Err(PipelineError::Publish {
                failed_keys,
                source,
            });
        }

        published
            .into_iter()
            .find(|p| p.local_path == manifest_path)
            .map(|p| p.remote_url)
            .ok_or(PipelineError::ManifestNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct FixtureTranscoder {
        files: Vec<&'static str>,
    }

    #[async_trait]
    impl Transcoder for FixtureTranscoder {
        async fn transcode(&self, _input: &Path, output_dir: &Path) -> Result<(), PipelineError> {
            tokio::fs::create_dir_all(output_dir).await?;
            for name in &self.files {
                tokio::fs::write(output_dir.join(name), name.as_bytes()).await?;
            }
            Ok(())
        }
    }

    struct FailingTranscoder;

    #[async_trait]
    impl Transcoder for FailingTranscoder {
        async fn transcode(&self, _input: &Path, _output_dir: &Path) -> Result<(), PipelineError> {
            Err(PipelineError::Transcode("ffmpeg exited with status 1".into()))
        }
    }

    #[derive(Default)]
    struct RecordingPublisher {
        calls: Mutex<Vec<(String, String)>>,
        fail_suffix: Option<&'static str>,
    }

    impl RecordingPublisher {
        fn failing_on(suffix: &'static str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_suffix: Some(suffix),
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ArtifactPublisher for RecordingPublisher {
        async fn publish(
            &self,
            _body: Bytes,
            content_type: &str,
            key: &str,
        ) -> anyhow::Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((key.to_string(), content_type.to_string()));
            if self.fail_suffix.is_some_and(|s| key.ends_with(s)) {
                anyhow::bail!("connection reset by peer");
            }
            Ok(format!("https://store.test/music-bucket/{key}"))
        }
    }

    /// Replaces the working directory with a plain file mid-publish, so the
    /// final directory removal cannot succeed.
    struct ClobberingPublisher {
        work_dir: PathBuf,
    }

    #[async_trait]
    impl ArtifactPublisher for ClobberingPublisher {
        async fn publish(
            &self,
            _body: Bytes,
            _content_type: &str,
            key: &str,
        ) -> anyhow::Result<String> {
            fs::remove_dir_all(&self.work_dir).unwrap();
            fs::write(&self.work_dir, b"not a directory").unwrap();
            Ok(format!("https://store.test/music-bucket/{key}"))
        }
    }

    fn work_dir_with_source(root: &Path) -> PathBuf {
        let dir = root.join("job");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("source.mp3"), b"not really audio").unwrap();
        dir
    }

    fn pipeline(
        transcoder: impl Transcoder + 'static,
        publisher: Arc<RecordingPublisher>,
    ) -> TrackPipeline {
        TrackPipeline::new(Arc::new(transcoder), publisher)
    }

    #[tokio::test]
    async fn publishes_all_artifacts_and_returns_manifest_url() {
        let root = tempfile::tempdir().unwrap();
        let work_dir = work_dir_with_source(root.path());
        let input = work_dir.join("source.mp3");
        let track_id = Uuid::new_v4();

        let publisher = Arc::new(RecordingPublisher::default());
        let pipeline = pipeline(
            FixtureTranscoder {
                files: vec!["master.m3u8", "segment_000.ts", "segment_001.ts"],
            },
            Arc::clone(&publisher),
        );

        let url = pipeline.run(&input, &work_dir, track_id).await.unwrap();
        assert_eq!(
            url,
            format!("https://store.test/music-bucket/music/{track_id}/master.m3u8")
        );

        let mut calls = publisher.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                (
                    format!("music/{track_id}/master.m3u8"),
                    "application/vnd.apple.mpegurl".to_string()
                ),
                (
                    format!("music/{track_id}/segment_000.ts"),
                    "video/mp2t".to_string()
                ),
                (
                    format!("music/{track_id}/segment_001.ts"),
                    "video/mp2t".to_string()
                ),
            ]
        );

        // The source copy never gets published, and the whole working
        // directory is gone after the job.
        assert!(!work_dir.exists());
    }

    #[tokio::test]
    async fn one_failed_publish_fails_the_job_but_siblings_drain() {
        let root = tempfile::tempdir().unwrap();
        let work_dir = work_dir_with_source(root.path());
        let input = work_dir.join("source.mp3");
        let track_id = Uuid::new_v4();

        let publisher = Arc::new(RecordingPublisher::failing_on("segment_001.ts"));
        let pipeline = pipeline(
            FixtureTranscoder {
                files: vec!["master.m3u8", "segment_000.ts", "segment_001.ts"],
            },
            Arc::clone(&publisher),
        );

        let err = pipeline.run(&input, &work_dir, track_id).await.unwrap_err();
        match err {
            PipelineError::Publish { failed_keys, .. } => {
                assert_eq!(failed_keys, vec![format!("music/{track_id}/segment_001.ts")]);
            }
            other => panic!("expected PublishFailure, got {other:?}"),
        }

        // All three uploads were attempted; the two successes do not turn
        // the job into a success.
        assert_eq!(publisher.calls().len(), 3);
        assert!(!work_dir.exists());
    }

    #[tokio::test]
    async fn transcode_failure_skips_publishing_and_cleans_up() {
        let root = tempfile::tempdir().unwrap();
        let work_dir = work_dir_with_source(root.path());
        let input = work_dir.join("source.mp3");

        let publisher = Arc::new(RecordingPublisher::default());
        let pipeline = pipeline(FailingTranscoder, Arc::clone(&publisher));

        let err = pipeline
            .run(&input, &work_dir, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Transcode(_)));
        assert!(publisher.calls().is_empty());
        assert!(!work_dir.exists());
    }

    #[tokio::test]
    async fn empty_output_yields_no_output_produced() {
        let root = tempfile::tempdir().unwrap();
        let work_dir = root.path().join("job");
        fs::create_dir_all(&work_dir).unwrap();
        let input = work_dir.join("source.mp3");

        let publisher = Arc::new(RecordingPublisher::default());
        let pipeline = pipeline(FixtureTranscoder { files: vec![] }, Arc::clone(&publisher));

        let err = pipeline
            .run(&input, &work_dir, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::NoOutputProduced));
        assert!(publisher.calls().is_empty());
        assert!(!work_dir.exists());
    }

    #[tokio::test]
    async fn cleanup_failure_after_successful_job_is_surfaced() {
        let root = tempfile::tempdir().unwrap();
        let work_dir = work_dir_with_source(root.path());
        let input = work_dir.join("source.mp3");

        let publisher = Arc::new(ClobberingPublisher {
            work_dir: work_dir.clone(),
        });
        let pipeline = TrackPipeline::new(
            Arc::new(FixtureTranscoder {
                files: vec!["master.m3u8"],
            }),
            publisher,
        );

        // Every publish succeeded, so the failed directory removal is the
        // only thing left to report.
        let err = pipeline
            .run(&input, &work_dir, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Cleanup(_)));

        fs::remove_file(&work_dir).unwrap();
    }

    #[tokio::test]
    async fn cleanup_failure_does_not_mask_the_primary_error() {
        let root = tempfile::tempdir().unwrap();
        // Never created, so the final directory removal fails too.
        let work_dir = root.path().join("missing").join("job");
        let input = work_dir.join("source.mp3");

        let publisher = Arc::new(RecordingPublisher::default());
        let pipeline = pipeline(FailingTranscoder, Arc::clone(&publisher));

        let err = pipeline
            .run(&input, &work_dir, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Transcode(_)));
        assert!(publisher.calls().is_empty());
    }

    #[tokio::test]
    async fn more_than_one_manifest_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let work_dir = root.path().join("job");
        fs::create_dir_all(&work_dir).unwrap();
        let input = work_dir.join("source.mp3");

        let publisher = Arc::new(RecordingPublisher::default());
        let pipeline = pipeline(
            FixtureTranscoder {
                files: vec!["master.m3u8", "extra.m3u8", "segment_000.ts"],
            },
            Arc::clone(&publisher),
        );

        let err = pipeline
            .run(&input, &work_dir, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::ManifestNotFound));
        assert!(publisher.calls().is_empty());
        assert!(!work_dir.exists());
    }
}
