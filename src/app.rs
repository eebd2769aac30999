//! The application, with its middleware and documentation.
//!
//! # Examples
//!
//! A valid name.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! # let url = name_validation::app::spawn_app().await.unwrap();
//! let response = reqwest::get(format!("{url}/namevalidation?name=Alice")).await.unwrap();
//! assert_eq!(200, response.status());
//! assert_eq!("Hello, Alice!", response.text().await.unwrap());
//! # });
//! ```
//!
//! A name with digits.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! # let url = name_validation::app::spawn_app().await.unwrap();
//! let response = reqwest::get(format!("{url}/namevalidation?name=Bob123")).await.unwrap();
//! assert_eq!(400, response.status());
//! assert_eq!(
//!     "Invalid characters in name. Only letters are allowed.",
//!     response.text().await.unwrap()
//! );
//! # });
//! ```

use crate::infra::error::{ClientError, InternalError, PanicHandler};
use crate::infra::middleware::{log_request_response, record_trace_context, MakeRequestIdSpan};
use crate::infra::openapi::ApiDoc;
use crate::infra::shutdown::shutdown_signal;
use crate::infra::{config::Config, state::AppState};
use axum::error_handling::HandleErrorLayer;
use axum::response::IntoResponse;
use axum::Router;
use http::header::{AUTHORIZATION, COOKIE};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

/// Constructs the full axum application.
pub fn app(state: AppState) -> Router {
    let config = state.config().clone();

    // Fallible middleware from tower, mapped to infallible response with [`HandleErrorLayer`].
    let tower_middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e| async move {
            InternalError::Other(format!("Tower middleware failed: {e}")).into_response()
        }))
        .concurrency_limit(config.server.concurrency_limit);

    let mut router = Router::new().merge(crate::api::api(state));
    if config.docs.enabled {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/openapi.json", ApiDoc::openapi()))
            .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
            .merge(RapiDoc::new("/openapi.json").path("/rapidoc"));
    }

    router
        .fallback(|| async { ClientError::NotFound })
        // Layers
        .layer(TimeoutLayer::new(config.server.request_timeout))
        .layer(axum::middleware::from_fn(log_request_response))
        .layer(axum::middleware::from_fn(record_trace_context))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(MakeRequestIdSpan::new(config.service.clone()))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(()),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION, COOKIE]))
        .layer(tower_middleware)
        .layer(CatchPanicLayer::custom(PanicHandler))
}

/// Starts the axum server, running until a shutdown signal is received.
pub async fn run_app(listener: TcpListener, config: Config) -> std::io::Result<()> {
    let state = AppState::new(config);
    let app = app(state).into_make_service();

    tracing::info!("Starting axum on {}", listener.local_addr()?);
    let exit_result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    match &exit_result {
        Ok(_) => tracing::info!("Successfully shut down"),
        Err(e) => tracing::error!("Shutdown failed: {}", e),
    }

    exit_result
}

/// Spawn a server on a random port.
pub async fn spawn_app() -> color_eyre::Result<String> {
    let config = crate::infra::config::load_config()?;
    Ok(spawn_app_with_config(config).await?)
}

/// Spawn a server on a random port with a custom configuration.
pub async fn spawn_app_with_config(config: Config) -> std::io::Result<String> {
    let address = "127.0.0.1";
    let listener = TcpListener::bind(format!("{address}:0")).await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(run_app(listener, config));
    Ok(format!("http://{address}:{port}"))
}
