use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod modules;
mod pipeline;
mod routes;
mod state;

use config::settings::AppConfig;
use infrastructure::storage::s3::StorageService;
use modules::track::repository::TrackRegistry;
use pipeline::{TrackPipeline, transcoder::FfmpegTranscoder};
use state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting server...");

    let config = AppConfig::new().expect("Failed to load configuration");

    let storage = StorageService::new(
        &config.storage_endpoint,
        &config.storage_bucket,
        &config.storage_access_key,
        &config.storage_secret_key,
    )
    .await;

    let transcoder = FfmpegTranscoder::new(
        config.ffmpeg_path.clone(),
        config.hls_segment_seconds,
        config.audio_bitrate.clone(),
    );

    let pipeline = Arc::new(TrackPipeline::new(Arc::new(transcoder), Arc::new(storage)));

    let state = AppState::new(config.clone(), TrackRegistry::new(), pipeline);

    let app = app::create_app(state).await;

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await.unwrap();
}
