//! YouTube Data API v3 provider
//!
//! API Flow:
//! 1. Search: /search?part=snippet&type=video → video ids, titles, thumbnails
//! 2. Details: /videos?part=snippet,contentDetails → adds the ISO-8601 duration

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{ApiListResponse, ApiSearchItem, ApiVideoItem, YouTubeVideo},
    services::providers::VideoProvider,
};
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;

const SEARCH_CACHE_TTL: u64 = 3600; // 1 hour
const DETAILS_CACHE_TTL: u64 = 604800; // 1 week

#[derive(Clone)]
pub struct YouTubeProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    cache: Option<Cache>,
}

impl YouTubeProvider {
    /// Creates a provider. Without an API key every lookup fails with a
    /// configuration error; without a cache every lookup goes to the API.
    pub fn new(api_key: Option<String>, api_url: String, cache: Option<Cache>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::Configuration("YouTube API key not configured".to_string())
        })
    }

    /// Checks the status and decodes the JSON body of an API response
    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "YouTube API returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, response = %body, "Failed to deserialize YouTube response");
            AppError::ExternalApi(format!("Failed to parse YouTube response: {}", e))
        })
    }

    async fn fetch_search(
        &self,
        api_key: &str,
        query: &str,
        max_results: u32,
    ) -> AppResult<Vec<YouTubeVideo>> {
        let url = format!("{}/search", self.api_url);
        let max_results = max_results.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", api_key),
            ])
            .send()
            .await?;

        let results: ApiListResponse<ApiSearchItem> = Self::decode(response).await?;
        let videos: Vec<YouTubeVideo> = results
            .items
            .into_iter()
            .filter_map(ApiSearchItem::into_video)
            .collect();

        tracing::info!(
            query = %query,
            results = videos.len(),
            provider = "youtube",
            "Video search completed"
        );

        Ok(videos)
    }

    async fn fetch_details(&self, api_key: &str, video_id: &str) -> AppResult<YouTubeVideo> {
        let url = format!("{}/videos", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("part", "snippet,contentDetails"),
                ("id", video_id),
                ("key", api_key),
            ])
            .send()
            .await?;

        let results: ApiListResponse<ApiVideoItem> = Self::decode(response).await?;
        let item = results
            .items
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

        let mut video = YouTubeVideo::from(item);
        // Keep the id the caller asked for
        video.video_id = video_id.to_string();

        tracing::info!(
            video_id = %video_id,
            duration = ?video.duration,
            provider = "youtube",
            "Video details fetched"
        );

        Ok(video)
    }
}

#[async_trait::async_trait]
impl VideoProvider for YouTubeProvider {
    async fn search_videos(&self, query: &str, max_results: u32) -> AppResult<Vec<YouTubeVideo>> {
        let api_key = self.api_key()?;

        match &self.cache {
            Some(cache) => cached!(
                cache,
                CacheKey::VideoSearch {
                    query: query.to_string(),
                    max_results,
                },
                SEARCH_CACHE_TTL,
                self.fetch_search(api_key, query, max_results)
            ),
            None => self.fetch_search(api_key, query, max_results).await,
        }
    }

    async fn video_details(&self, video_id: &str) -> AppResult<YouTubeVideo> {
        let api_key = self.api_key()?;

        match &self.cache {
            Some(cache) => cached!(
                cache,
                CacheKey::VideoDetails(video_id.to_string()),
                DETAILS_CACHE_TTL,
                self.fetch_details(api_key, video_id)
            ),
            None => self.fetch_details(api_key, video_id).await,
        }
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const SEARCH_BODY: &str = r#"{
        "kind": "youtube#searchListResponse",
        "items": [
            {
                "id": {"kind": "youtube#video", "videoId": "vid1"},
                "snippet": {
                    "title": "Easy Pasta",
                    "channelTitle": "Home Cook",
                    "thumbnails": {"medium": {"url": "https://img.example/vid1.jpg"}}
                }
            },
            {
                "id": {"kind": "youtube#channel", "channelId": "UCxyz"},
                "snippet": {
                    "title": "Pasta Channel",
                    "channelTitle": "Pasta Channel",
                    "thumbnails": {"medium": {"url": "https://img.example/ch.jpg"}}
                }
            }
        ]
    }"#;

    fn provider(url: String) -> YouTubeProvider {
        YouTubeProvider::new(Some("test-key".to_string()), url, None)
    }

    #[tokio::test]
    async fn test_missing_api_key_is_configuration_error() {
        let provider = YouTubeProvider::new(None, "http://unused.local".to_string(), None);
        let err = provider.search_videos("pasta", 5).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(msg) if msg == "YouTube API key not configured"));
    }

    #[tokio::test]
    async fn test_blank_api_key_counts_as_missing() {
        let provider =
            YouTubeProvider::new(Some("  ".to_string()), "http://unused.local".to_string(), None);
        let err = provider.video_details("abc").await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_search_videos_maps_items() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("part".into(), "snippet".into()),
                Matcher::UrlEncoded("q".into(), "pasta recipe".into()),
                Matcher::UrlEncoded("type".into(), "video".into()),
                Matcher::UrlEncoded("maxResults".into(), "5".into()),
                Matcher::UrlEncoded("key".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SEARCH_BODY)
            .create_async()
            .await;

        let videos = provider(server.url())
            .search_videos("pasta recipe", 5)
            .await
            .unwrap();

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].video_id, "vid1");
        assert_eq!(videos[0].title, "Easy Pasta");
        assert_eq!(videos[0].channel_title, "Home Cook");
        assert_eq!(videos[0].thumbnail, "https://img.example/vid1.jpg");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_videos_upstream_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error": {"message": "quotaExceeded"}}"#)
            .create_async()
            .await;

        let err = provider(server.url())
            .search_videos("pasta", 5)
            .await
            .unwrap_err();

        match err {
            AppError::ExternalApi(msg) => {
                assert!(msg.contains("403"));
                assert!(msg.contains("quotaExceeded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_videos_malformed_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = provider(server.url())
            .search_videos("pasta", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(_)));
    }

    #[tokio::test]
    async fn test_video_details_includes_duration() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/videos")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("part".into(), "snippet,contentDetails".into()),
                Matcher::UrlEncoded("id".into(), "vid1".into()),
                Matcher::UrlEncoded("key".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{
                    "items": [{
                        "id": "vid1",
                        "snippet": {
                            "title": "Easy Pasta",
                            "channelTitle": "Home Cook",
                            "thumbnails": {"medium": {"url": "https://img.example/vid1.jpg"}}
                        },
                        "contentDetails": {"duration": "PT8M15S"}
                    }]
                }"#,
            )
            .create_async()
            .await;

        let video = provider(server.url()).video_details("vid1").await.unwrap();
        assert_eq!(video.video_id, "vid1");
        assert_eq!(video.duration.as_deref(), Some("PT8M15S"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_video_details_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items": []}"#)
            .create_async()
            .await;

        let err = provider(server.url())
            .video_details("missing")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Video not found"));
    }

    #[test]
    fn test_trailing_slash_trimmed_from_api_url() {
        let provider = YouTubeProvider::new(None, "https://example.com/v3/".to_string(), None);
        assert_eq!(provider.api_url, "https://example.com/v3");
    }
}
