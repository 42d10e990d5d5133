// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::analytics_service::AnalyticsService;
use crate::application::fallback_generator::FallbackGenerator;
use crate::application::growth_estimator::GrowthEstimator;
use crate::application::platform_repository::PlatformRepository;
use crate::domain::dashboard::Platform;
use crate::infrastructure::config::{AppConfig, load_app_config};
use crate::infrastructure::instagram_repository::{DEFAULT_INSTAGRAM_BASE_URL, InstagramRepository};
use crate::infrastructure::youtube_repository::{DEFAULT_YOUTUBE_BASE_URL, YouTubeRepository};
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let app_config = load_app_config()?;

    // Create repositories (infrastructure layer) and services (application layer)
    let state = Arc::new(build_state(&app_config)?);
    if state.services.is_empty() {
        tracing::warn!("No platform configured; every dashboard request will return 404");
    }
    for platform in state.services.keys() {
        tracing::info!("Serving {} dashboards", platform.as_str());
    }

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = app_config.server.bind_addr.parse()?;
    tracing::info!("Starting channel-analytics service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

fn build_state(app_config: &AppConfig) -> anyhow::Result<AppState> {
    let estimator = GrowthEstimator::new(app_config.estimator.jitter_bounds()?);
    let fallback = FallbackGenerator::new(app_config.fallback.window_months);
    tracing::debug!(
        "Growth jitter [{}, {}], fallback window {} months",
        app_config.estimator.jitter_min,
        app_config.estimator.jitter_max,
        fallback.window_months()
    );

    let service = |platform: Platform, repository: Arc<dyn PlatformRepository>| {
        AnalyticsService::new(platform, repository)
            .with_estimator(estimator.clone())
            .with_fallback(fallback.clone())
            .with_page_timeout(app_config.collector.page_timeout())
            .with_seed(app_config.estimator.seed)
    };

    let mut state = AppState::default();

    if let Some(youtube) = &app_config.youtube {
        let repository: Arc<dyn PlatformRepository> = Arc::new(YouTubeRepository::new(
            youtube
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_YOUTUBE_BASE_URL.to_string()),
            youtube.api_key.clone(),
            youtube.channel_id.clone(),
        ));
        state = state.with_service(service(Platform::YouTube, repository));
    }

    if let Some(instagram) = &app_config.instagram {
        let repository: Arc<dyn PlatformRepository> = Arc::new(InstagramRepository::new(
            instagram
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_INSTAGRAM_BASE_URL.to_string()),
            instagram.access_token.clone(),
            instagram.account_created_at,
        ));
        state = state.with_service(service(Platform::Instagram, repository));
    }

    Ok(state)
}
