// Application state for HTTP handlers
use crate::application::analytics_service::AnalyticsService;
use crate::domain::dashboard::Platform;
use std::collections::BTreeMap;

#[derive(Clone, Default)]
pub struct AppState {
    pub services: BTreeMap<Platform, AnalyticsService>,
}

impl AppState {
    pub fn with_service(mut self, service: AnalyticsService) -> Self {
        self.services.insert(service.platform(), service);
        self
    }
}
