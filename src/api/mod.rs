use crate::config::{Config, CorsConfig};
use crate::error::AppError;
use crate::services::IntakeService;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, Request, header};
use axum::response::{IntoResponse, Response};
use axum::{
    Router,
    routing::{get, post},
};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod health;
pub mod intake;
pub mod schemas;

#[derive(Clone, Debug)]
pub struct AppState {
    pub intake_service: IntakeService,
}

/// Builds the CORS policy: the configured origin allow-list, GET/POST/OPTIONS, credentials allowed.
#[must_use]
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .filter(|o| {
            // A wildcard cannot be combined with credentials.
            if *o == "*" {
                tracing::warn!("Ignoring wildcard CORS origin");
            }
            *o != "*"
        })
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[allow(clippy::needless_pass_by_value)]
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %details, "Handler panicked");
    AppError::Internal.into_response()
}

/// Configures and returns the intake router.
pub fn app_router(config: &Config, state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/contact", post(intake::submit_contact))
        .route("/demo", post(intake::submit_demo))
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(&config.cors))
        .layer(PropagateRequestIdLayer::new(axum::http::HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .map(|id| id.header_value().to_str().unwrap_or_default())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                        "otel.kind" = "server",
                    )
                })
                .on_response(|response: &axum::http::Response<_>, latency: std::time::Duration, span: &tracing::Span| {
                    let status = response.status();
                    span.record("http.response.status_code", status.as_u16());

                    tracing::info!(
                        latency_ms = %latency.as_millis(),
                        status = %status.as_u16(),
                        "request completed"
                    );
                })
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::new(axum::http::HeaderName::from_static("x-request-id"), MakeRequestUuid))
        .with_state(state)
}
