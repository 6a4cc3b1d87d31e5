use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::track::handler::upload_track,
        crate::modules::track::handler::list_tracks,
        crate::modules::track::handler::get_track,
    ),
    components(
        schemas(
            crate::modules::track::dto::UploadResponse,
            crate::modules::track::model::Track,
            crate::modules::track::model::TrackStatus,
        )
    ),
    tags(
        (name = "Music", description = "Audio upload and HLS publishing")
    )
)]
pub struct ApiDoc;
