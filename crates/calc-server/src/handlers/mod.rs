//! HTTP route handlers for the calculator agent server.

pub mod activate;
pub mod execute;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
