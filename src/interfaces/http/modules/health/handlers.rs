//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::TollFeeService;

#[derive(Clone)]
pub struct HealthState {
    pub service: Arc<TollFeeService>,
    pub started_at: Arc<Instant>,
}

/// Service health response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Registrations with recorded passages; absent when the store is unavailable
    pub tracked_registrations: Option<usize>,
    pub fare_breakpoints: usize,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Passage store is unavailable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let tracked = state.service.passages().tracked_registrations().await.ok();

    let (status, http_status) = match tracked {
        Some(_) => ("ok", StatusCode::OK),
        None => ("degraded", StatusCode::SERVICE_UNAVAILABLE),
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            tracked_registrations: tracked,
            fare_breakpoints: state.service.policy().fares.breakpoints().len(),
        }),
    )
}
