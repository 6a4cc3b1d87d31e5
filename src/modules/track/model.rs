use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum TrackStatus {
    PROCESSING,
    READY,
    FAILED,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct Track {
    pub id: Uuid,
    pub title: String,
    pub status: TrackStatus,
    /// Public URL of the HLS playlist once the track is READY.
    pub playlist_url: Option<String>,
    pub error: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}
