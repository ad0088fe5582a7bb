use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub mod contact;
pub mod health;

pub const AVAILABLE_ENDPOINTS: [&str; 2] = ["GET /health", "POST /api/contact"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotFoundResponse {
    success: bool,
    error: &'static str,
    available_endpoints: [&'static str; 2],
}

pub async fn not_found() -> Response {
    let response = NotFoundResponse {
        success: false,
        error: "Endpoint not found",
        available_endpoints: AVAILABLE_ENDPOINTS,
    };
    (StatusCode::NOT_FOUND, Json(response)).into_response()
}
