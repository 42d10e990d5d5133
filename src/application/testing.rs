// In-memory platform repository for tests
use crate::application::platform_repository::{ContentPage, PlatformRepository, RawContentItem};
use crate::domain::analytics::AccountSummary;
use crate::domain::error::PipelineError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub struct FakeRepository {
    summary: Result<AccountSummary, PipelineError>,
    pages: HashMap<Option<String>, Result<ContentPage, PipelineError>>,
    gates: HashMap<Option<String>, Arc<Notify>>,
    requested: Mutex<Vec<Option<String>>>,
}

impl FakeRepository {
    pub fn new(summary: AccountSummary) -> Self {
        Self {
            summary: Ok(summary),
            pages: HashMap::new(),
            gates: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn channel(total: u64, created_at: NaiveDate) -> Self {
        let mut summary = AccountSummary::new("Test Channel".to_string(), total);
        summary.created_at = Some(created_at);
        Self::new(summary)
    }

    pub fn failing_summary(mut self, error: PipelineError) -> Self {
        self.summary = Err(error);
        self
    }

    pub fn page(mut self, cursor: Option<&str>, timestamps: &[&str], next: Option<&str>) -> Self {
        let items = timestamps
            .iter()
            .map(|t| RawContentItem::new(*t, Some(1)))
            .collect();
        self.pages.insert(
            cursor.map(str::to_string),
            Ok(ContentPage::new(items, next.map(str::to_string))),
        );
        self
    }

    pub fn failing_page(mut self, cursor: Option<&str>, error: PipelineError) -> Self {
        self.pages.insert(cursor.map(str::to_string), Err(error));
        self
    }

    /// Hold the page at `cursor` until `gate` is notified
    pub fn gated(mut self, cursor: Option<&str>, gate: Arc<Notify>) -> Self {
        self.gates.insert(cursor.map(str::to_string), gate);
        self
    }

    pub fn requested_cursors(&self) -> Vec<Option<String>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformRepository for FakeRepository {
    async fn fetch_account_summary(&self) -> Result<AccountSummary, PipelineError> {
        self.summary.clone()
    }

    async fn fetch_content_page(
        &self,
        cursor: Option<String>,
    ) -> Result<ContentPage, PipelineError> {
        self.requested.lock().unwrap().push(cursor.clone());
        if let Some(gate) = self.gates.get(&cursor) {
            gate.notified().await;
        }
        self.pages
            .get(&cursor)
            .cloned()
            .unwrap_or_else(|| Ok(ContentPage::new(Vec::new(), None)))
    }
}
