//! # elaka-api
//!
//! The web routing and orchestration layer for Elaka.

pub mod error;
pub mod handlers;
pub mod middleware;

use axum::routing::{get, post};
use axum::Router;

pub use handlers::AppState;

/// Builds the REST router.
///
/// # Developer Note
/// The whole surface lives under /api/ so a static front end can be
/// mounted at the root by the binary without route collisions.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/locations", get(handlers::list_locations))
        .route(
            "/api/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/api/posts/{id}",
            get(handlers::get_post).patch(handlers::update_post),
        )
        .route("/api/posts/{id}/like", post(handlers::like_post))
        .route("/api/posts/{id}/view", post(handlers::view_post))
        .layer(middleware::trace_layer())
        .layer(middleware::cors_policy())
        .with_state(state)
}
