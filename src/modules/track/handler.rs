use super::dto::UploadResponse;
use super::model::Track;
use super::service::TrackService;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Accept an audio upload and queue it for HLS processing
#[utoipa::path(
    post,
    path = "/api/v1/music/upload",
    responses(
        (status = 202, description = "Track accepted for processing", body = ApiResponse<UploadResponse>),
        (status = 400, description = "No file uploaded"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Music"
)]
pub async fn upload_track(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut upload: Option<(String, bytes::Bytes)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        match field.bytes().await {
            Ok(data) => {
                upload = Some((file_name, data));
                break;
            }
            Err(e) => {
                return ApiError::bad_request(format!("Failed to read upload: {e}")).into_response();
            }
        }
    }

    let Some((file_name, data)) = upload.filter(|(_, data)| !data.is_empty()) else {
        return ApiError::bad_request("No file uploaded!").into_response();
    };

    match TrackService::start_processing(state, file_name, data).await {
        Ok(track) => ApiSuccess(
            ApiResponse::success(
                UploadResponse {
                    track_id: track.id,
                    status: track.status,
                },
                "The track is being processed",
            ),
            StatusCode::ACCEPTED,
        )
        .into_response(),
        Err(e) => ApiError::internal(e.to_string()).into_response(),
    }
}

/// List all tracks
#[utoipa::path(
    get,
    path = "/api/v1/music",
    responses(
        (status = 200, description = "List of tracks", body = ApiResponse<Vec<Track>>)
    ),
    tag = "Music"
)]
pub async fn list_tracks(State(state): State<AppState>) -> impl IntoResponse {
    let tracks = TrackService::find_all(state).await;
    ApiSuccess(
        ApiResponse::success(tracks, "Tracks retrieved successfully"),
        StatusCode::OK,
    )
    .into_response()
}

/// Get one track with its processing status and playlist URL
#[utoipa::path(
    get,
    path = "/api/v1/music/{id}",
    params(
        ("id" = Uuid, Path, description = "Track ID")
    ),
    responses(
        (status = 200, description = "Track found", body = ApiResponse<Track>),
        (status = 404, description = "Track not found")
    ),
    tag = "Music"
)]
pub async fn get_track(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match TrackService::find_by_id(state, id).await {
        Some(track) => ApiSuccess(
            ApiResponse::success(track, "Track retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        None => ApiError::not_found("Track not found").into_response(),
    }
}
