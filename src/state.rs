use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::modules::track::repository::TrackRegistry;
use crate::pipeline::TrackPipeline;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub tracks: TrackRegistry,
    pub pipeline: Arc<TrackPipeline>,
}

impl AppState {
    pub fn new(config: AppConfig, tracks: TrackRegistry, pipeline: Arc<TrackPipeline>) -> Self {
        Self {
            config,
            tracks,
            pipeline,
        }
    }
}
