use async_trait::async_trait;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{Client, config::BehaviorVersion, config::Credentials, config::Region};
use bytes::Bytes;
use tracing::info;
use url::Url;

use crate::pipeline::publisher::ArtifactPublisher;

#[derive(Clone)]
pub struct StorageService {
    pub client: Client,
    pub bucket: String,
    public_base: String,
}

impl StorageService {
    pub async fn new(endpoint: &Url, bucket: &str, access_key: &str, secret_key: &str) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(endpoint.as_str())
            .credentials_provider(credentials)
            .force_path_style(true) // Required for R2/MinIO
            .build();

        let client = Client::from_conf(config);

        info!("✅ Connected to object storage at {}", endpoint);

        Self {
            client,
            bucket: bucket.to_string(),
            public_base: endpoint.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Public address of an object. Pure function of the key: the same key
    /// always maps to the same URL.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_base, self.bucket, key)
    }

    /// Single atomic put of a fully-buffered object. Artifacts in this
    /// service are small (one HLS segment or playlist), so no multipart.
    pub async fn put_object(
        &self,
        body: Bytes,
        content_type: &str,
        key: &str,
    ) -> Result<String, aws_sdk_s3::Error> {
        let content_length = body.len() as i64;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .content_length(content_length)
            .send()
            .await?;

        Ok(self.public_url(key))
    }
}

#[async_trait]
impl ArtifactPublisher for StorageService {
    async fn publish(&self, body: Bytes, content_type: &str, key: &str) -> anyhow::Result<String> {
        self.put_object(body, content_type, key)
            .await
            .map_err(|e| anyhow::anyhow!("failed to upload {}: {}", key, e))
    }
}
