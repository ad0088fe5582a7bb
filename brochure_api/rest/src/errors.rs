use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error. Please try again later.";

/// Decides how much of an internal error reaches the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorPolicy {
    pub expose_internal_errors: bool,
}

#[derive(Debug, Serialize)]
pub struct ApiError<D = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    pub error: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<D>,
}

impl ApiError {
    pub fn new(error: impl Into<Cow<'static, str>>) -> Self {
        Self {
            success: false,
            code: None,
            error: error.into(),
            details: None,
        }
    }
}

impl<D> ApiError<D> {
    pub fn with_code(self, code: &'static str) -> Self {
        Self {
            code: Some(code),
            ..self
        }
    }

    pub fn with_details<E>(self, details: Option<E>) -> ApiError<E> {
        ApiError {
            success: self.success,
            code: self.code,
            error: self.error,
            details,
        }
    }
}

pub fn error<D: Serialize>(status: StatusCode, error: ApiError<D>) -> Response {
    (status, Json(error)).into_response()
}

pub fn internal_server_error(err: impl Into<anyhow::Error>, policy: ErrorPolicy) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    let details = policy.expose_internal_errors.then(|| format!("{err:#}"));
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiError::new(INTERNAL_SERVER_ERROR).with_details(details),
    )
}
