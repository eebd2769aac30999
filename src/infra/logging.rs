//! For setting up logging.

use super::config::{Config, ServiceConfig};
use color_eyre::eyre;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Flushes logs and exported traces upon being dropped.
#[derive(Debug)]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
    otlp: bool,
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        if self.otlp {
            opentelemetry::global::shutdown_tracer_provider();
        }
    }
}

/// Initializes logging.
///
/// Logs go to stdout and, if configured, to a daily rolling JSON file.
/// Spans are exported over OTLP when an endpoint is configured.
/// Must be called from within a tokio runtime.
pub fn init_logging(config: &Config) -> eyre::Result<LogGuard> {
    let logging = &config.logging;
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| logging.level.clone());

    let mut guards = Vec::new();
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let (non_blocking_stdout, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(stdout_guard);
    let stdout = tracing_subscriber::fmt::layer().with_writer(non_blocking_stdout);
    let stdout = if logging.json_stdout {
        stdout.json().with_filter(EnvFilter::try_new(&log_level)?).boxed()
    } else {
        stdout.with_filter(EnvFilter::try_new(&log_level)?).boxed()
    };
    layers.push(stdout);

    if logging.file_enabled {
        let file_appender =
            tracing_appender::rolling::daily(&logging.directory, &logging.file_prefix);
        let (non_blocking_file_appender, file_guard) =
            tracing_appender::non_blocking(file_appender);
        guards.push(file_guard);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking_file_appender)
            .json()
            .with_filter(EnvFilter::try_new(&log_level)?)
            .boxed();
        layers.push(file_layer);
    }

    let otlp = match &logging.otlp_endpoint {
        Some(endpoint) => {
            layers.push(otlp_layer(endpoint, &config.service, &log_level)?);
            true
        }
        None => false,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(ErrorLayer::default())
        .try_init()?;

    if let Some(endpoint) = &logging.otlp_endpoint {
        tracing::info!(%endpoint, "Exporting traces over OTLP");
    }

    Ok(LogGuard {
        _guards: guards,
        otlp,
    })
}

/// A layer exporting spans to an OTLP collector over gRPC.
fn otlp_layer(endpoint: &str, service: &ServiceConfig, log_level: &str) -> eyre::Result<BoxedLayer> {
    let resource = Resource::new(vec![
        KeyValue::new("service.name", service.name.clone()),
        KeyValue::new("service.version", service.version.clone()),
        KeyValue::new("deployment.environment", service.env.clone()),
    ]);
    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(sdktrace::config().with_resource(resource))
        .install_batch(runtime::Tokio)?;
    let layer = tracing_opentelemetry::layer()
        .with_tracer(tracer)
        .with_filter(EnvFilter::try_new(log_level)?)
        .boxed();
    Ok(layer)
}
