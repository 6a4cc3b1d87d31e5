use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

// Lossless uploads run well past axum's 2 MB default.
const MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_tracks))
        .route("/{id}", get(handler::get_track))
        .route(
            "/upload",
            post(handler::upload_track).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
}
