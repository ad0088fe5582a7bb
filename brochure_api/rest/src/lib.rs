use std::{
    future::Future,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{extract::DefaultBodyLimit, http::HeaderValue, Extension, Router};
use brochure_core_contact_contracts::ContactFeatureService;
use brochure_core_health_contracts::HealthFeatureService;
use errors::ErrorPolicy;
use tokio::net::TcpListener;

mod errors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    pub health: Health,
    pub contact: Contact,
    pub config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    /// Origin allowed to call the API from a browser, `None` allows any.
    pub allowed_origin: Option<HeaderValue>,
    /// Maximum size of a request body in bytes.
    pub body_limit: usize,
    pub real_ip: Option<Arc<RestServerRealIpConfig>>,
    /// Include the message of internal errors in responses.
    pub expose_internal_errors: bool,
}

/// Take the client address from `header` when the request comes from the
/// reverse proxy at `set_from`.
#[derive(Debug, Clone)]
pub struct RestServerRealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub async fn serve(
        self,
        host: IpAddr,
        port: u16,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let Self {
            health,
            contact,
            config,
        } = self;

        let router = Router::new()
            .merge(routes::health::router(health.into()))
            .merge(routes::contact::router(contact.into()))
            .fallback(routes::not_found)
            .layer(DefaultBodyLimit::max(config.body_limit))
            .layer(Extension(ErrorPolicy {
                expose_internal_errors: config.expose_internal_errors,
            }));

        let router = middlewares::cors::add(config.allowed_origin)(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        let router = middlewares::client_ip::add(config.real_ip)(router);
        middlewares::panic_handler::add(router)
    }
}
