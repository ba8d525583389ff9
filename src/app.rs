use crate::handlers;
use crate::state::HostState;
use axum::{routing::get, Router};

/// Routes of the fragment host: the shell page and the view fragments the
/// client router fetches.
pub fn fragment_host(state: HostState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/views/:file", get(handlers::view_fragment))
        .route("/healthz", get(handlers::health))
        .with_state(state)
}
