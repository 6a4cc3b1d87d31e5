use std::collections::HashMap;
use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{Track, TrackStatus};

/// In-memory track store. Durable metadata persistence lives outside this
/// service; the registry only follows jobs for the lifetime of the process.
#[derive(Clone, Default)]
pub struct TrackRegistry {
    inner: Arc<RwLock<HashMap<Uuid, Track>>>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, id: Uuid, title: String) -> Track {
        let now = OffsetDateTime::now_utc();
        let track = Track {
            id,
            title,
            status: TrackStatus::PROCESSING,
            playlist_url: None,
            error: None,
            created_at: now,
            updated_at: now,
        };
        self.inner.write().await.insert(id, track.clone());
        track
    }

    pub async fn mark_ready(&self, id: Uuid, playlist_url: String) {
        if let Some(track) = self.inner.write().await.get_mut(&id) {
            track.status = TrackStatus::READY;
            track.playlist_url = Some(playlist_url);
            track.error = None;
            track.updated_at = OffsetDateTime::now_utc();
        }
    }

    pub async fn mark_failed(&self, id: Uuid, error: String) {
        if let Some(track) = self.inner.write().await.get_mut(&id) {
            track.status = TrackStatus::FAILED;
            track.error = Some(error);
            track.updated_at = OffsetDateTime::now_utc();
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<Track> {
        self.inner.read().await.get(&id).cloned()
    }

    pub async fn list(&self) -> Vec<Track> {
        let mut tracks: Vec<Track> = self.inner.read().await.values().cloned().collect();
        tracks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tracks
    }
}
