// YouTube Data API repository implementation
use crate::application::platform_repository::{ContentPage, PlatformRepository, RawContentItem};
use crate::domain::analytics::AccountSummary;
use crate::domain::error::PipelineError;
use crate::infrastructure::http_json::{fetch_json, parse_count};
use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://youtube.googleapis.com/youtube/v3";

/// Largest page the search endpoint serves
const MAX_RESULTS: u32 = 50;

#[derive(Debug, Clone)]
pub struct YouTubeRepository {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    channel_id: String,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelResource>,
}

#[derive(Debug, Deserialize)]
struct ChannelResource {
    snippet: ChannelSnippet,
    #[serde(default)]
    statistics: ChannelStatistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelSnippet {
    title: String,
    published_at: String,
}

// Counts come back as JSON strings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelStatistics {
    subscriber_count: Option<serde_json::Value>,
    view_count: Option<serde_json::Value>,
    video_count: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchListResponse {
    items: Option<Vec<SearchResult>>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSnippet {
    published_at: String,
}

impl YouTubeRepository {
    pub fn new(base_url: String, api_key: String, channel_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            channel_id,
        }
    }

    fn channel_url(&self) -> String {
        format!(
            "{}/channels?part=statistics,snippet&id={}&key={}",
            self.base_url,
            urlencoding::encode(&self.channel_id),
            urlencoding::encode(&self.api_key)
        )
    }

    fn search_url(&self, page_token: Option<&str>) -> String {
        let mut url = format!(
            "{}/search?part=snippet&channelId={}&order=date&type=video&maxResults={}",
            self.base_url,
            urlencoding::encode(&self.channel_id),
            MAX_RESULTS
        );
        if let Some(token) = page_token {
            url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
        }
        url.push_str(&format!("&key={}", urlencoding::encode(&self.api_key)));
        url
    }

    fn to_summary(response: ChannelListResponse) -> Result<AccountSummary, PipelineError> {
        let channel = response.items.into_iter().next().ok_or_else(|| {
            PipelineError::SourceUnavailable(
                "no channel data found, check the channel id".to_string(),
            )
        })?;

        let subscribers = parse_count(channel.statistics.subscriber_count.as_ref())
            .ok_or_else(|| PipelineError::MalformedPage("missing subscriberCount".to_string()))?;
        let created_at = DateTime::parse_from_rfc3339(&channel.snippet.published_at)
            .map_err(|e| {
                PipelineError::MalformedPage(format!(
                    "bad channel publishedAt '{}': {}",
                    channel.snippet.published_at, e
                ))
            })?
            .date_naive();

        Ok(AccountSummary {
            display_name: channel.snippet.title,
            current_total: subscribers,
            created_at: Some(created_at),
            view_count: parse_count(channel.statistics.view_count.as_ref()),
            content_count: parse_count(channel.statistics.video_count.as_ref()),
        })
    }

    fn to_page(response: SearchListResponse) -> Result<ContentPage, PipelineError> {
        let items = response
            .items
            .ok_or_else(|| PipelineError::MalformedPage("search response has no items".to_string()))?
            .into_iter()
            .map(|r| RawContentItem::new(r.snippet.published_at, None))
            .collect();

        Ok(ContentPage::new(items, response.next_page_token))
    }
}

#[async_trait]
impl PlatformRepository for YouTubeRepository {
    async fn fetch_account_summary(&self) -> Result<AccountSummary, PipelineError> {
        tracing::debug!("Fetching YouTube channel {}", self.channel_id);
        let response: ChannelListResponse =
            fetch_json(self.client.get(self.channel_url()), "YouTube channels").await?;
        Self::to_summary(response)
    }

    async fn fetch_content_page(
        &self,
        cursor: Option<String>,
    ) -> Result<ContentPage, PipelineError> {
        let url = self.search_url(cursor.as_deref());
        let response: SearchListResponse =
            fetch_json(self.client.get(url), "YouTube search").await?;
        Self::to_page(response)
    }
}
