// Instagram Graph API repository implementation
use crate::application::platform_repository::{ContentPage, PlatformRepository, RawContentItem};
use crate::domain::analytics::AccountSummary;
use crate::domain::error::PipelineError;
use crate::infrastructure::http_json::fetch_json;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

pub const DEFAULT_INSTAGRAM_BASE_URL: &str = "https://graph.instagram.com";

/// Largest page the media endpoint serves
const MEDIA_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct InstagramRepository {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
    account_created_at: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    username: String,
    media_count: Option<u64>,
    followers_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct MediaListResponse {
    data: Option<Vec<MediaItem>>,
    #[serde(default)]
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct MediaItem {
    timestamp: String,
    like_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Paging {
    next: Option<String>,
}

impl InstagramRepository {
    /// The Graph API reports no account creation date; pass one to pin the
    /// growth history start, otherwise the earliest post is used.
    pub fn new(base_url: String, access_token: String, account_created_at: Option<NaiveDate>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
            account_created_at,
        }
    }

    fn profile_url(&self) -> String {
        format!(
            "{}/me?fields=id,username,media_count,followers_count&access_token={}",
            self.base_url,
            urlencoding::encode(&self.access_token)
        )
    }

    fn first_media_url(&self) -> String {
        format!(
            "{}/me/media?fields=timestamp,like_count&limit={}&access_token={}",
            self.base_url,
            MEDIA_LIMIT,
            urlencoding::encode(&self.access_token)
        )
    }

    /// The cursor is the absolute `paging.next` URL; it must stay on our host
    fn media_url(&self, cursor: Option<String>) -> Result<String, PipelineError> {
        match cursor {
            None => Ok(self.first_media_url()),
            Some(next) if next.starts_with(&format!("{}/", self.base_url)) => Ok(next),
            Some(next) => Err(PipelineError::MalformedPage(format!(
                "paging cursor points outside {}: {}",
                self.base_url, next
            ))),
        }
    }

    fn to_summary(&self, response: ProfileResponse) -> Result<AccountSummary, PipelineError> {
        let followers = response
            .followers_count
            .ok_or_else(|| PipelineError::MalformedPage("missing followers_count".to_string()))?;

        Ok(AccountSummary {
            display_name: response.username,
            current_total: followers,
            created_at: self.account_created_at,
            view_count: None,
            content_count: response.media_count,
        })
    }

    fn to_page(response: MediaListResponse) -> Result<ContentPage, PipelineError> {
        let items = response
            .data
            .ok_or_else(|| PipelineError::MalformedPage("media response has no data".to_string()))?
            .into_iter()
            .map(|m| RawContentItem::new(m.timestamp, m.like_count))
            .collect();

        Ok(ContentPage::new(items, response.paging.and_then(|p| p.next)))
    }
}

#[async_trait]
impl PlatformRepository for InstagramRepository {
    async fn fetch_account_summary(&self) -> Result<AccountSummary, PipelineError> {
        let response: ProfileResponse =
            fetch_json(self.client.get(self.profile_url()), "Instagram profile").await?;
        self.to_summary(response)
    }

    async fn fetch_content_page(
        &self,
        cursor: Option<String>,
    ) -> Result<ContentPage, PipelineError> {
        let url = self.media_url(cursor)?;
        let response: MediaListResponse =
            fetch_json(self.client.get(url), "Instagram media").await?;
        Self::to_page(response)
    }
}
