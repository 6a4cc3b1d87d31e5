use std::path::PathBuf;

use anyhow::Context;
use url::Url;

use crate::config::env::{self, EnvKey};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub storage_endpoint: Url,
    pub storage_bucket: String,
    pub storage_access_key: String,
    pub storage_secret_key: String,
    pub ffmpeg_path: String,
    pub hls_segment_seconds: u32,
    pub audio_bitrate: String,
    pub work_dir_root: PathBuf,
}

impl AppConfig {
    pub fn new() -> anyhow::Result<Self> {
        let endpoint = env::get(EnvKey::StorageEndpoint).context("STORAGE_ENDPOINT is not set")?;

        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            storage_endpoint: Url::parse(&endpoint)
                .context("STORAGE_ENDPOINT is not a valid URL")?,
            storage_bucket: env::get(EnvKey::StorageBucket)
                .context("STORAGE_BUCKET_MUSIC is not set")?,
            storage_access_key: env::get(EnvKey::StorageAccessKey)
                .context("AWS_ACCESS_KEY_ID is not set")?,
            storage_secret_key: env::get(EnvKey::StorageSecretKey)
                .context("AWS_SECRET_ACCESS_KEY is not set")?,
            ffmpeg_path: env::get_or(EnvKey::FfmpegPath, "ffmpeg"),
            hls_segment_seconds: env::get_parsed(EnvKey::HlsSegmentSeconds, 10),
            audio_bitrate: env::get_or(EnvKey::AudioBitrate, "192k"),
            work_dir_root: env::get(EnvKey::WorkDirRoot)
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
        })
    }
}
