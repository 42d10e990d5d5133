// Repository trait for platform account and content access
use crate::domain::analytics::{AccountSummary, ContentItem};
use crate::domain::error::PipelineError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// One item as listed by a platform, before timestamp parsing
#[derive(Debug, Clone, PartialEq)]
pub struct RawContentItem {
    pub timestamp: String,
    pub engagement: Option<u64>,
}

impl RawContentItem {
    pub fn new(timestamp: impl Into<String>, engagement: Option<u64>) -> Self {
        Self {
            timestamp: timestamp.into(),
            engagement,
        }
    }

    /// Accepts RFC 3339, the Graph API's `+0000` offset form, or a bare date
    pub fn parse(&self) -> Result<ContentItem, PipelineError> {
        let raw = self.timestamp.trim();
        let published_at = DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
            .map(|t| t.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
            })
            .map_err(|_| {
                PipelineError::MalformedPage(format!("unparseable timestamp '{}'", raw))
            })?;

        Ok(ContentItem::new(published_at, self.engagement.unwrap_or(0)))
    }
}

/// One page of a cursor-paginated listing
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPage {
    pub items: Vec<RawContentItem>,
    pub next_cursor: Option<String>,
}

impl ContentPage {
    pub fn new(items: Vec<RawContentItem>, next_cursor: Option<String>) -> Self {
        Self { items, next_cursor }
    }
}

#[async_trait]
pub trait PlatformRepository: Send + Sync {
    /// Current account totals
    async fn fetch_account_summary(&self) -> Result<AccountSummary, PipelineError>;

    /// Fetch the page addressed by `cursor` (`None` for the first page)
    async fn fetch_content_page(&self, cursor: Option<String>)
        -> Result<ContentPage, PipelineError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2023, 1, 15, 10, 30, 0).unwrap();

        let rfc = RawContentItem::new("2023-01-15T10:30:00Z", Some(7)).parse().unwrap();
        assert_eq!(rfc.published_at, expected);
        assert_eq!(rfc.engagement, 7);

        let graph = RawContentItem::new("2023-01-15T10:30:00+0000", None).parse().unwrap();
        assert_eq!(graph.published_at, expected);
        assert_eq!(graph.engagement, 0);

        let date = RawContentItem::new("2023-01-15", None).parse().unwrap();
        assert_eq!(date.published_at, Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = RawContentItem::new("last tuesday", None).parse().unwrap_err();
        assert!(matches!(err, PipelineError::MalformedPage(_)));
    }
}
