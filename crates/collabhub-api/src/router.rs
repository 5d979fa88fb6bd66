//! Route definitions for the CollabHub HTTP API.
//!
//! Routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(collaborator_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http().make_span_with(middleware::logging::request_span))
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Invitations and grant management
fn collaborator_routes() -> Router<AppState> {
    use handlers::collaborator as c;

    Router::new()
        .route(
            "/collaborators/add-folder-collaborator",
            post(c::add_folder_collaborator),
        )
        .route("/collaborators/folder-invitation", get(c::folder_invitation))
        .route(
            "/collaborators/generate-public-invitation",
            post(c::generate_public_invitation),
        )
        .route("/collaborators/delete-collaborator", post(c::delete_collaborator))
        .route("/collaborators/update-collaborator", post(c::update_collaborator))
        .route("/collaborators/list", get(c::list_collaborators))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
