use serde::{Deserialize, Serialize};

/// A cooking video attached to a recipe or returned from a search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YouTubeVideo {
    pub video_id: String,
    pub title: String,
    pub thumbnail: String,
    pub channel_title: String,
    #[serde(default)]
    pub duration: Option<String>,
}

// ============================================================================
// YouTube Data API Types
// ============================================================================

/// Response envelope shared by the `search` and `videos` endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// One item of `GET /search`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSearchItem {
    pub id: ApiSearchId,
    pub snippet: ApiSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSearchId {
    #[serde(default)]
    pub video_id: Option<String>,
}

/// One item of `GET /videos`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVideoItem {
    pub id: String,
    pub snippet: ApiSnippet,
    #[serde(default)]
    pub content_details: Option<ApiContentDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSnippet {
    pub title: String,
    pub channel_title: String,
    pub thumbnails: ApiThumbnails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiThumbnails {
    pub medium: ApiThumbnail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiThumbnail {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiContentDetails {
    #[serde(default)]
    pub duration: Option<String>,
}

impl ApiSearchItem {
    /// Search results can include channels or playlists; only videos carry an id.
    pub fn into_video(self) -> Option<YouTubeVideo> {
        let video_id = self.id.video_id?;
        Some(YouTubeVideo {
            video_id,
            title: self.snippet.title,
            thumbnail: self.snippet.thumbnails.medium.url,
            channel_title: self.snippet.channel_title,
            duration: None,
        })
    }
}

impl From<ApiVideoItem> for YouTubeVideo {
    fn from(item: ApiVideoItem) -> Self {
        YouTubeVideo {
            video_id: item.id,
            title: item.snippet.title,
            thumbnail: item.snippet.thumbnails.medium.url,
            channel_title: item.snippet.channel_title,
            duration: item.content_details.and_then(|d| d.duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_item_to_video() {
        let json = r#"{
            "id": {"kind": "youtube#video", "videoId": "abc123"},
            "snippet": {
                "title": "Perfect Pasta",
                "channelTitle": "Chef John",
                "thumbnails": {"medium": {"url": "https://i.ytimg.com/vi/abc123/mqdefault.jpg"}}
            }
        }"#;

        let item: ApiSearchItem = serde_json::from_str(json).unwrap();
        let video = item.into_video().unwrap();
        assert_eq!(video.video_id, "abc123");
        assert_eq!(video.title, "Perfect Pasta");
        assert_eq!(video.channel_title, "Chef John");
        assert_eq!(
            video.thumbnail,
            "https://i.ytimg.com/vi/abc123/mqdefault.jpg"
        );
        assert_eq!(video.duration, None);
    }

    #[test]
    fn test_search_item_without_video_id_is_skipped() {
        let json = r#"{
            "id": {"kind": "youtube#channel", "channelId": "UC123"},
            "snippet": {
                "title": "Cooking Channel",
                "channelTitle": "Cooking Channel",
                "thumbnails": {"medium": {"url": "https://example.com/c.jpg"}}
            }
        }"#;

        let item: ApiSearchItem = serde_json::from_str(json).unwrap();
        assert!(item.into_video().is_none());
    }

    #[test]
    fn test_video_item_keeps_duration() {
        let json = r#"{
            "id": "abc123",
            "snippet": {
                "title": "Perfect Pasta",
                "channelTitle": "Chef John",
                "thumbnails": {"medium": {"url": "https://example.com/t.jpg"}}
            },
            "contentDetails": {"duration": "PT12M30S"}
        }"#;

        let item: ApiVideoItem = serde_json::from_str(json).unwrap();
        let video = YouTubeVideo::from(item);
        assert_eq!(video.video_id, "abc123");
        assert_eq!(video.duration.as_deref(), Some("PT12M30S"));
    }

    #[test]
    fn test_video_deserializes_without_duration() {
        let json = r#"{
            "video_id": "xyz",
            "title": "Risotto",
            "thumbnail": "https://example.com/r.jpg",
            "channel_title": "Kitchen"
        }"#;
        let video: YouTubeVideo = serde_json::from_str(json).unwrap();
        assert_eq!(video.duration, None);
    }
}
