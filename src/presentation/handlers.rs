// HTTP request handlers
use crate::domain::dashboard::Platform;
use crate::infrastructure::chart_mapper::dashboard_to_payload;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List configured platforms
pub async fn list_platforms(State(state): State<Arc<AppState>>) -> Json<Vec<&'static str>> {
    Json(state.services.keys().map(|p| p.as_str()).collect())
}

/// Build the dashboard for one platform.
///
/// Always 200 with a renderable payload for configured platforms; failures
/// upstream surface as `degraded: true` plus a message.
pub async fn get_dashboard(
    Path(platform): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(service) = Platform::parse(&platform).and_then(|p| state.services.get(&p)) else {
        return (StatusCode::NOT_FOUND, format!("unknown platform: {}", platform)).into_response();
    };

    // The run lives on its own task: if the client goes away this handler is
    // dropped, the guard cancels the token, and the run finishes its in-flight
    // page before discarding everything.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    let service = service.clone();
    let run = tokio::spawn(async move { service.run(Utc::now(), &cancel).await });

    match run.await {
        Ok(Ok(report)) => Json(dashboard_to_payload(report)).into_response(),
        Ok(Err(e)) => {
            tracing::warn!("Dashboard run for {} ended without a report: {}", platform, e);
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
        Err(e) => {
            tracing::error!("Dashboard task for {} failed: {}", platform, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
