//! # elaka-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the
//! `CommunityRepo` port. Handlers stay thin: extract, delegate, map.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use elaka_core::models::{
    CategoryWithSubcategories, NewPost, Post, PostFilter, PostUpdate, PostWithRefs,
};
use elaka_core::taxonomy::{self, Division};
use elaka_core::traits::CommunityRepo;
use elaka_core::AppError;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn CommunityRepo>,
}

/// `GET /api/categories` — categories with nested subcategories.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryWithSubcategories>>, ApiError> {
    Ok(Json(state.repo.list_categories().await?))
}

/// `GET /api/locations` — the static division/district/upazila tree.
pub async fn list_locations() -> Json<&'static [Division]> {
    Json(taxonomy::divisions())
}

/// `GET /api/posts` — conjunctive filtering, approved-only by default,
/// newest first. Query keys map 1:1 onto [`PostFilter`].
pub async fn list_posts(
    State(state): State<AppState>,
    Query(filter): Query<PostFilter>,
) -> Result<Json<Vec<PostWithRefs>>, ApiError> {
    Ok(Json(state.repo.list_posts(filter).await?))
}

/// `GET /api/posts/{id}` — a single joined post, regardless of status.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostWithRefs>, ApiError> {
    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or_else(|| AppError::post_not_found(id))?;
    Ok(Json(post))
}

/// `POST /api/posts` — 201 with the created (pending) post, or 400
/// naming every invalid field.
pub async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<NewPost>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state.repo.create_post(input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `PATCH /api/posts/{id}` — partial merge of the provided fields.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<PostUpdate>,
) -> Result<Json<Value>, ApiError> {
    state.repo.update_post(id, update).await?;
    Ok(Json(json!({ "success": true })))
}

/// `POST /api/posts/{id}/like` — non-idempotent +1 on an approved post.
pub async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.repo.increment_likes(id).await?;
    Ok(Json(json!({ "success": true })))
}

/// `POST /api/posts/{id}/view` — same contract as like.
pub async fn view_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.repo.increment_views(id).await?;
    Ok(Json(json!({ "success": true })))
}
