//! Router assembly
//!
//! [`build_router`] registers every API module; [`build_app`] adds the
//! middleware stack and state. Both the HTTP server and the integration
//! tests go through [`build_app`].

mod middleware;

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator (UUID v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Every route, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(api::health::router())
        // Cash shift core
        .merge(api::shifts::router())
        // Floor
        .merge(api::tables::router())
        .merge(api::orders::router())
        .merge(api::kitchen::router())
        .merge(api::checkout::router())
        // Catalog and staff
        .merge(api::categories::router())
        .merge(api::products::router())
        .merge(api::staff::router())
        // Maintenance
        .merge(api::admin::router())
}

/// Fully configured application
pub fn build_app(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    build_router()
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        // Access log runs inside the request-id layers so it sees the id
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
