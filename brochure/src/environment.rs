//! Wires the concrete service implementations together.

use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use brochure_api_rest::{RestServer, RestServerConfig, RestServerRealIpConfig};
use brochure_config::{Config, Environment};
use brochure_core_contact_impl::{validate::SubmissionValidatorImpl, ContactFeatureServiceImpl};
use brochure_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use brochure_shared_impl::{id::IdServiceImpl, time::TimeServiceImpl};

pub type Time = TimeServiceImpl;
pub type Id = IdServiceImpl;
pub type Validator = SubmissionValidatorImpl<Time>;
pub type Contact = ContactFeatureServiceImpl<Id, Validator>;
pub type Health = HealthFeatureServiceImpl<Time>;
pub type Server = RestServer<Health, Contact>;

pub fn validator() -> Validator {
    SubmissionValidatorImpl {
        time: TimeServiceImpl,
    }
}

pub fn rest_server(config: &Config) -> anyhow::Result<Server> {
    let allowed_origin = match config.http.allowed_origin.as_str() {
        "*" => None,
        origin => Some(
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid allowed origin {origin:?}"))?,
        ),
    };

    let real_ip = config.http.real_ip.as_ref().map(|real_ip| {
        Arc::new(RestServerRealIpConfig {
            header: real_ip.header.clone(),
            set_from: real_ip.set_from,
        })
    });

    Ok(RestServer {
        health: HealthFeatureServiceImpl {
            time: TimeServiceImpl,
            config: HealthFeatureConfig {
                service_name: config.health.service_name.as_str().into(),
            },
        },
        contact: ContactFeatureServiceImpl {
            id: IdServiceImpl,
            validator: validator(),
        },
        config: RestServerConfig {
            allowed_origin,
            body_limit: config.http.body_limit,
            real_ip,
            expose_internal_errors: config.environment == Environment::Development,
        },
    })
}
