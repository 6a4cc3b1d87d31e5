use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    StorageEndpoint,
    StorageBucket,
    StorageAccessKey,
    StorageSecretKey,
    FfmpegPath,
    HlsSegmentSeconds,
    AudioBitrate,
    WorkDirRoot,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::StorageEndpoint => "STORAGE_ENDPOINT",
            EnvKey::StorageBucket => "STORAGE_BUCKET_MUSIC",
            EnvKey::StorageAccessKey => "AWS_ACCESS_KEY_ID",
            EnvKey::StorageSecretKey => "AWS_SECRET_ACCESS_KEY",
            EnvKey::FfmpegPath => "FFMPEG_PATH",
            EnvKey::HlsSegmentSeconds => "HLS_SEGMENT_SECONDS",
            EnvKey::AudioBitrate => "AUDIO_BITRATE",
            EnvKey::WorkDirRoot => "TRANSCODE_WORK_DIR",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
