use async_trait::async_trait;
use bytes::Bytes;

/// Uploads one fully-buffered artifact to the object store and returns its
/// public URL. The store's request signing needs the content length up front,
/// hence `Bytes` rather than a stream. No retries here; a failed put is
/// terminal for the job.
#[async_trait]
pub trait ArtifactPublisher: Send + Sync {
    async fn publish(&self, body: Bytes, content_type: &str, key: &str) -> anyhow::Result<String>;
}
