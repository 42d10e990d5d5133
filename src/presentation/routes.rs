// Router construction
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_dashboard, health_check, list_platforms};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/platforms", get(list_platforms))
        .route("/dashboards/:platform", get(get_dashboard))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
