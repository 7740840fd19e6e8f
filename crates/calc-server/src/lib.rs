//! HTTP surface of the calculator agent service.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use calc_core::CalculatorAgent;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const SERVICE_TITLE: &str = "Calculator Agent API";
pub const SERVICE_DESCRIPTION: &str = "An API to interact with the Calculator Agent.";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared, immutable state handed to every request.
pub struct AppState {
    pub agent: Arc<dyn CalculatorAgent>,
}

impl AppState {
    pub fn new(agent: Arc<dyn CalculatorAgent>) -> Self {
        Self { agent }
    }
}

/// Builds the application router.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/execute", post(handlers::execute::execute))
        .route("/activate", post(handlers::activate::activate))
        .layer(trace_layer)
        .layer(CatchPanicLayer::custom(error::handle_panic));

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
