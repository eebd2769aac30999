//! For reading application configuration.

use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// API documentation configuration.
    pub docs: DocsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Service identity, attached to every request span.
    pub service: ServiceConfig,
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server address.
    pub http_address: String,
    /// Server http port.
    pub http_port: u16,
    /// How long a request may take before it is aborted.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Maximum number of requests handled at once.
    pub concurrency_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_address: "127.0.0.1".to_string(),
            http_port: 8080,
            request_timeout: Duration::from_secs(10),
            concurrency_limit: 500,
        }
    }
}

/// API documentation configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Whether to serve the OpenAPI document and its UIs.
    pub enabled: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter directives, overridden by `RUST_LOG`.
    pub level: String,
    /// Write JSON instead of human readable text to stdout.
    pub json_stdout: bool,
    /// Whether to also write JSON logs to a daily rolling file.
    pub file_enabled: bool,
    /// Directory of the rolling log file.
    pub directory: PathBuf,
    /// File name prefix of the rolling log file.
    pub file_prefix: String,
    /// OTLP collector to export traces to, e.g. `http://localhost:4317`.
    pub otlp_endpoint: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,tower_http=debug,name_validation=debug".to_string(),
            json_stdout: false,
            file_enabled: true,
            directory: PathBuf::from("./logs"),
            file_prefix: "name-validation.log".to_string(),
            otlp_endpoint: None,
        }
    }
}

/// Service identity.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// The service name.
    pub name: String,
    /// The deployment environment, e.g. `development` or `production`.
    pub env: String,
    /// The deployed version.
    pub version: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            env: "development".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Retrieve [`Config`] from the optional `config` file and `APP__` environment variables.
#[tracing::instrument]
pub fn load_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(
            config::Environment::with_prefix("app")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
