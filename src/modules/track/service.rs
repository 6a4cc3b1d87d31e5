use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use bytes::Bytes;
use tracing::{error, info};
use uuid::Uuid;

use super::model::Track;
use crate::state::AppState;

pub struct TrackService;

impl TrackService {
    /// Persists the raw upload into a fresh per-track working directory and
    /// kicks off the transcode-and-publish job as a background task. Returns
    /// immediately with the PROCESSING track.
    pub async fn start_processing(state: AppState, file_name: String, data: Bytes) -> Result<Track> {
        let track_id = Uuid::new_v4();
        let work_dir = state.config.work_dir_root.join(track_id.to_string());
        tokio::fs::create_dir_all(&work_dir).await?;

        // Artifact classification keys on extension, so the source copy must
        // never look like a segment or a manifest. ffmpeg probes the
        // container itself and does not care about the name.
        let ext = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !matches!(*e, "ts" | "m3u8"));
        let input_name = match ext {
            Some(ext) => format!("source.{ext}"),
            None => "source".to_string(),
        };
        let input_file = work_dir.join(input_name);
        tokio::fs::write(&input_file, &data).await?;

        info!(
            "🎵 Track {} uploaded ({} bytes), starting pipeline",
            track_id,
            data.len()
        );

        let track = state.tracks.insert(track_id, file_name).await;

        let pipeline = Arc::clone(&state.pipeline);
        let tracks = state.tracks.clone();
        tokio::spawn(async move {
            match pipeline.run(&input_file, &work_dir, track_id).await {
                Ok(playlist_url) => {
                    info!("✅ Track {} ready at {}", track_id, playlist_url);
                    tracks.mark_ready(track_id, playlist_url).await;
                }
                Err(e) => {
                    error!("❌ Track {} processing failed: {}", track_id, e);
                    tracks.mark_failed(track_id, e.to_string()).await;
                }
            }
        });

        Ok(track)
    }

    pub async fn find_all(state: AppState) -> Vec<Track> {
        state.tracks.list().await
    }

    pub async fn find_by_id(state: AppState, id: Uuid) -> Option<Track> {
        state.tracks.get(id).await
    }
}
