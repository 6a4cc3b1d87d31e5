use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::error::PipelineError;

/// Converts one audio file into an HLS segment set under `output_dir`.
/// Abstracted so the orchestrator can be exercised without real media tooling.
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn transcode(&self, input_file: &Path, output_dir: &Path) -> Result<(), PipelineError>;
}

/// Shells out to ffmpeg: extracts the audio stream, encodes AAC at a fixed
/// bitrate, and segments into `segment_NNN.ts` files listed by `master.m3u8`.
/// `-hls_list_size 0` keeps every segment in the playlist.
pub struct FfmpegTranscoder {
    ffmpeg_path: String,
    segment_seconds: u32,
    audio_bitrate: String,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: String, segment_seconds: u32, audio_bitrate: String) -> Self {
        Self {
            ffmpeg_path,
            segment_seconds,
            audio_bitrate,
        }
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, input_file: &Path, output_dir: &Path) -> Result<(), PipelineError> {
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| PipelineError::Transcode(format!("failed to create output directory: {e}")))?;

        let playlist = output_dir.join("master.m3u8");
        let segment_pattern = output_dir.join("segment_%03d.ts");

        debug!("🎬 Running {} on {}", self.ffmpeg_path, input_file.display());

        let output = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input_file)
            .args(["-map", "0:a", "-c:a", "aac", "-b:a", &self.audio_bitrate])
            .args(["-hls_time", &self.segment_seconds.to_string()])
            .args(["-hls_list_size", "0"])
            .args(["-hls_segment_type", "mpegts"])
            .arg("-hls_segment_filename")
            .arg(&segment_pattern)
            .arg("-y")
            .arg(&playlist)
            .output()
            .await
            .map_err(|e| {
                PipelineError::Transcode(format!("failed to launch {}: {e}", self.ffmpeg_path))
            })?;

        if !output.status.success() {
            return Err(PipelineError::Transcode(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        Ok(())
    }
}
