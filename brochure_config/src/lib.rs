use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variables starting with this prefix override file settings,
/// e.g. `BROCHURE__HTTP__PORT=8080`.
pub const ENV_PREFIX: &str = "BROCHURE";

/// Loads the config files at `paths` in order, later files overriding earlier
/// ones, followed by the environment.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub http: HttpConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// `*` allows any origin.
    pub allowed_origin: String,
    pub body_limit: usize,
    pub real_ip: Option<RealIpConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub service_name: String,
}
