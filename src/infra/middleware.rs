//! Middleware for modifying requests and responses.

use crate::infra::{
    config::ServiceConfig,
    error::{ApiResult, InternalError},
};
use axum::{
    body::{Body, Bytes},
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;
use opentelemetry::trace::TraceContextExt;
use tower_http::trace::MakeSpan;
use tracing::field::{display, Empty};
use tracing_opentelemetry::OpenTelemetrySpanExt;

static X_REQUEST_ID: &str = "x-request-id";

/// Creates the span of a request, tagged with the request id and service identity.
#[derive(Clone, Debug)]
pub(crate) struct MakeRequestIdSpan {
    service: ServiceConfig,
}

impl MakeRequestIdSpan {
    pub(crate) fn new(service: ServiceConfig) -> Self {
        Self { service }
    }
}

impl<B> MakeSpan<B> for MakeRequestIdSpan {
    fn make_span(&mut self, request: &http::Request<B>) -> tracing::Span {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|id| id.to_str().ok())
            .unwrap_or("unknown");
        tracing::info_span!(
            "request",
            request_id = request_id,
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
            env = %self.service.env,
            service = %self.service.name,
            service_version = %self.service.version,
            trace_id = Empty,
            span_id = Empty,
        )
    }
}

/// Records the OpenTelemetry trace and span id on the current request span.
///
/// Nothing is recorded unless an OpenTelemetry layer is installed.
pub(crate) async fn record_trace_context(req: Request, next: Next) -> Response {
    let span = tracing::Span::current();
    let context = span.context();
    let otel_span = context.span();
    let span_context = otel_span.span_context();
    if span_context.is_valid() {
        span.record("trace_id", display(span_context.trace_id()));
        span.record("span_id", display(span_context.span_id()));
    }
    next.run(req).await
}

/// The maximum size of a body to log.
const MAX_BODY_SIZE: u64 = 8192;

/// Trace the request and response bodies if they are small enough.
pub(crate) async fn log_request_response(req: Request, next: Next) -> ApiResult<Response> {
    let (parts, body) = req.into_parts();
    let req = if fits_in_log(&body) {
        let body = buffer_and_print("Request", body).await?;
        Request::from_parts(parts, Body::from(body))
    } else {
        Request::from_parts(parts, body)
    };

    let res = next.run(req).await;

    let (parts, body) = res.into_parts();
    let res = if fits_in_log(&body) {
        let body = buffer_and_print("Response", body).await?;
        Response::from_parts(parts, Body::from(body)).into_response()
    } else {
        Response::from_parts(parts, body)
    };

    Ok(res)
}

fn fits_in_log(body: &Body) -> bool {
    use axum::body::HttpBody as _;
    matches!(body.size_hint().upper(), Some(n) if n <= MAX_BODY_SIZE)
}

/// Read the entire body stream and store it in memory.
async fn buffer_and_print(direction: &str, body: Body) -> ApiResult<Bytes> {
    let body = body
        .collect()
        .await
        .map_err(InternalError::from)?
        .to_bytes();

    // Log if valid text
    if let Ok(body) = std::str::from_utf8(&body) {
        tracing::trace!("{} body = {:?}", direction, body);
    }

    Ok(body)
}
