use crate::{
    error::{AppError, AppResult},
    models::YouTubeVideo,
    services::providers::VideoProvider,
};
use std::sync::Arc;

pub const DEFAULT_VIDEO_RESULTS: u32 = 10;

/// Upper bound on `maxResults` accepted by the YouTube search endpoint
pub const MAX_VIDEO_RESULTS: u32 = 50;

/// Searches cooking videos through the configured provider
pub async fn search_videos(
    provider: Arc<dyn VideoProvider>,
    query: &str,
    max_results: u32,
) -> AppResult<Vec<YouTubeVideo>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query must not be empty".to_string(),
        ));
    }
    if max_results == 0 || max_results > MAX_VIDEO_RESULTS {
        return Err(AppError::InvalidInput(format!(
            "max_results must be between 1 and {}",
            MAX_VIDEO_RESULTS
        )));
    }

    let videos = provider.search_videos(query, max_results).await?;
    tracing::debug!(
        query = %query,
        returned = videos.len(),
        provider = provider.name(),
        "Videos found"
    );
    Ok(videos)
}

/// Looks up a single video by id
pub async fn video_details(
    provider: Arc<dyn VideoProvider>,
    video_id: &str,
) -> AppResult<YouTubeVideo> {
    if video_id.trim().is_empty() {
        return Err(AppError::InvalidInput("Video id must not be empty".to_string()));
    }

    let video = provider.video_details(video_id).await?;
    tracing::debug!(video_id = %video_id, provider = provider.name(), "Video found");
    Ok(video)
}
