use std::io;
use thiserror::Error;

/// Terminal job errors. Nothing in the pipeline retries; every variant
/// propagates to the job host, which marks the track as failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("transcoding failed: {0}")]
    Transcode(String),

    #[error("transcoding succeeded but produced no recognized artifacts")]
    NoOutputProduced,

    #[error("failed to publish artifacts [{}]: {source}", .failed_keys.join(", "))]
    Publish {
        failed_keys: Vec<String>,
        #[source]
        source: anyhow::Error,
    },

    #[error("expected exactly one manifest among the transcoded artifacts")]
    ManifestNotFound,

    #[error("failed to remove working directory: {0}")]
    Cleanup(#[source] io::Error),

    #[error("pipeline I/O error: {0}")]
    Io(#[from] io::Error),
}
