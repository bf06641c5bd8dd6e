//! Video search provider abstraction
//!
//! Recipes link to cooking videos. The provider behind this trait looks
//! videos up by free-text query or by id; handlers only see `YouTubeVideo`.

use crate::{error::AppResult, models::YouTubeVideo};

pub mod youtube;

pub use youtube::YouTubeProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VideoProvider: Send + Sync {
    /// Search for videos matching a free-text query
    async fn search_videos(&self, query: &str, max_results: u32) -> AppResult<Vec<YouTubeVideo>>;

    /// Fetch a single video, including its duration
    ///
    /// Fails with `NotFound` when the provider has no video with this id.
    async fn video_details(&self, video_id: &str) -> AppResult<YouTubeVideo>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
