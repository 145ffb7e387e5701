use axum::{routing::get, Router};

pub mod config;
pub mod launch;

/// The application object handed to the server runtime. The token-issuance
/// routes belong to the token service and are merged at deployment; the
/// launcher only wires the liveness probe and inspects nothing else.
pub fn app() -> Router {
    Router::new().route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
