use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use brochure_core_health_contracts::{HealthFeatureService, HealthStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health).fallback(super::not_found))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
    service: String,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let HealthStatus { service, timestamp } = service.get_status().await;

    let response = HealthResponse {
        status: "ok",
        timestamp,
        service: service.to_string(),
    };

    Json(response).into_response()
}
