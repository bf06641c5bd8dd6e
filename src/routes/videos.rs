use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::YouTubeVideo,
    routes::AppState,
    services::videos::{self, DEFAULT_VIDEO_RESULTS},
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
    #[serde(default = "default_max_results")]
    max_results: u32,
}

fn default_max_results() -> u32 {
    DEFAULT_VIDEO_RESULTS
}

#[derive(Debug, Serialize)]
pub struct VideosResponse {
    pub videos: Vec<YouTubeVideo>,
}

#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub video: YouTubeVideo,
}

/// Handler for `GET /api/youtube/search`
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<VideosResponse>> {
    let videos =
        videos::search_videos(state.video_provider.clone(), &params.q, params.max_results).await?;
    Ok(Json(VideosResponse { videos }))
}

/// Handler for `GET /api/youtube/video/:video_id`
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> AppResult<Json<VideoResponse>> {
    let video = videos::video_details(state.video_provider.clone(), &video_id).await?;
    Ok(Json(VideoResponse { video }))
}
