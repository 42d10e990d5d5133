// Dashboard domain model
use super::analytics::AccountSummary;
use super::series::Series;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    YouTube,
    Instagram,
}

impl Platform {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "youtube" => Some(Platform::YouTube),
            "instagram" => Some(Platform::Instagram),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::Instagram => "instagram",
        }
    }

    /// What the platform calls its published items
    pub fn content_noun(self) -> &'static str {
        match self {
            Platform::YouTube => "Video",
            Platform::Instagram => "Post",
        }
    }

    /// What the platform calls its audience
    pub fn audience_noun(self) -> &'static str {
        match self {
            Platform::YouTube => "Subscribers",
            Platform::Instagram => "Followers",
        }
    }
}

/// Result of one pipeline run. Always carries a renderable series pair,
/// live or fallback.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub platform: Platform,
    pub summary: AccountSummary,
    pub publications: Series,
    pub growth: Series,
    pub degraded: bool,
    pub message: Option<String>,
}
