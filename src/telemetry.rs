use std::time::Duration;

use axum::{
    http::{Request, Response},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{field, Span};

const DEFAULT_FILTER: &str = "meal_diary=debug,axum=info,tower_http=info";

/// Installs the global subscriber. `RUST_LOG` overrides the filter and
/// `LOG_FORMAT=json` switches to one JSON object per line.
pub fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.with_target(false).json().init(),
        _ => builder.init(),
    }
}

/// One `meal_request` span per call; 5xx responses are logged as errors.
pub fn with_request_tracing(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<_>| {
                tracing::info_span!(
                    "meal_request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    status = field::Empty,
                )
            })
            .on_response(|res: &Response<_>, latency: Duration, span: &Span| {
                let status = res.status();
                span.record("status", status.as_u16());
                let elapsed_ms = latency.as_millis() as u64;
                if status.is_server_error() {
                    tracing::error!(status = status.as_u16(), elapsed_ms, "request failed");
                } else {
                    tracing::info!(status = status.as_u16(), elapsed_ms, "request served");
                }
            }),
    )
}
