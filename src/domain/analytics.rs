// Analytics domain models
use super::calendar::MonthKey;
use chrono::{DateTime, NaiveDate, Utc};

/// A published video or post
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub published_at: DateTime<Utc>,
    pub engagement: u64,
}

impl ContentItem {
    pub fn new(published_at: DateTime<Utc>, engagement: u64) -> Self {
        Self {
            published_at,
            engagement,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub month: MonthKey,
    pub label: String,
    pub item_count: u64,
    pub engagement_sum: u64,
}

impl MonthBucket {
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            label: month.label(),
            item_count: 0,
            engagement_sum: 0,
        }
    }
}

/// The one ground-truth audience total, pinned at "now"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountSnapshot {
    pub current_total: u64,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthPoint {
    pub month: MonthKey,
    pub cumulative_total: u64,
    pub monthly_delta: u64,
}

/// Account totals as reported by a platform
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub display_name: String,
    pub current_total: u64,
    /// Not every platform reports a creation date
    pub created_at: Option<NaiveDate>,
    pub view_count: Option<u64>,
    pub content_count: Option<u64>,
}

impl AccountSummary {
    #[cfg(test)]
    pub fn new(display_name: String, current_total: u64) -> Self {
        Self {
            display_name,
            current_total,
            created_at: None,
            view_count: None,
            content_count: None,
        }
    }

    pub fn snapshot(&self, created_at: NaiveDate) -> AccountSnapshot {
        AccountSnapshot {
            current_total: self.current_total,
            created_at,
        }
    }
}
