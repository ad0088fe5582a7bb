use std::{any::Any, panic::AssertUnwindSafe};

use anyhow::anyhow;
use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use futures::FutureExt;

use crate::errors::{internal_server_error, ErrorPolicy};

/// Answers with a 500 instead of dropping the connection when a handler
/// panics. Panic messages never reach the client.
pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(middleware))
}

async fn middleware(request: Request, next: Next) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => internal_server_error(
            anyhow!("request handler panicked: {}", panic_message(&*payload)),
            ErrorPolicy::default(),
        ),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause")
}
