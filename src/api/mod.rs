//! HTTP API server

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::StatusPolicy;
use crate::db::ConnectionProvider;

pub mod handlers;
pub mod response;
pub mod state;

pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/usuarios",
            post(handlers::create_user).get(handlers::list_users),
        )
        .route(
            "/usuarios/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Convenience helper wiring a provider straight into a router
pub fn create_provider_router(
    provider: Arc<dyn ConnectionProvider>,
    status_policy: StatusPolicy,
) -> Router {
    create_router(AppState::new(provider, status_policy))
}
