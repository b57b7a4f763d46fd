//! HTTP handlers for the forms API

pub mod access;
pub mod forms;
pub mod structure;
pub mod templates;

use std::sync::Arc;

use axum::{extract::State, Json};
use form_core::DashboardStats;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Handler: GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "forms-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: GET /api/dashboard
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardStats> {
    Json(state.store.read().await.dashboard_stats())
}
