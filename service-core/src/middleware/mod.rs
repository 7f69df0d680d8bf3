pub mod metrics;
pub mod tracing;

use axum::{Router, middleware::from_fn};
use tower_http::trace::TraceLayer;

pub use self::metrics::metrics_middleware;
pub use self::tracing::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};

/// Wraps `router` with request-id propagation, the `http_request` span and
/// request metrics.
///
/// The request id layer is outermost so the span and every handler see the
/// same id, generated or not. Metrics sit on the routes so they can label by
/// route template; apply this after every route is registered.
pub fn observe_requests<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .route_layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
}
