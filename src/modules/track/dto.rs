use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::model::TrackStatus;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub track_id: Uuid,
    pub status: TrackStatus,
}
