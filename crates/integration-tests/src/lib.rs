//! Shared fixtures for the HTTP integration tests: an in-memory SQLite
//! repository behind the real axum router, plus small request helpers.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use elaka_api::AppState;
use elaka_core::models::{NewCategory, NewProfile, NewSubcategory};
use elaka_core::taxonomy;
use elaka_core::traits::CommunityRepo;
use elaka_db_sqlite::SqliteCommunityRepo;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<SqliteCommunityRepo>,
    /// "স্থানীয় সেবা" (Local Services), created on top of the standard seed.
    pub category_id: Uuid,
    /// "ডাক্তার" (Doctor) under the category above.
    pub subcategory_id: Uuid,
    pub author_id: Uuid,
}

/// Builds a fully seeded application over `sqlite::memory:`.
pub async fn spawn_app() -> TestApp {
    let repo = Arc::new(
        SqliteCommunityRepo::new("sqlite::memory:")
            .await
            .expect("in-memory SQLite"),
    );
    repo.seed_categories(taxonomy::SEED_CATEGORIES)
        .await
        .expect("seed categories");

    let category = repo
        .create_category(NewCategory {
            name: "স্থানীয় সেবা".into(),
            name_en: "Local Services".into(),
            icon: "🧰".into(),
        })
        .await
        .expect("create category");
    let subcategory = repo
        .create_subcategory(NewSubcategory {
            category_id: category.id,
            name: "ডাক্তার".into(),
            name_en: "Doctor".into(),
        })
        .await
        .expect("create subcategory");
    let author = repo
        .create_profile(NewProfile {
            user_id: Uuid::new_v4(),
            display_name: "করিম উদ্দিন".into(),
            phone: Some("01812345678".into()),
            division: "dhaka".into(),
            district: "dhaka".into(),
            upazila: "উত্তরা".into(),
            is_verified: false,
        })
        .await
        .expect("create profile");

    let router = elaka_api::router(AppState { repo: repo.clone() });

    TestApp {
        router,
        repo,
        category_id: category.id,
        subcategory_id: subcategory.id,
        author_id: author.id,
    }
}

/// Percent-encodes a query value (RFC 3986 unreserved set kept as-is).
pub fn urlencode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

async fn dispatch(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router never fails");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    dispatch(router, request).await
}

pub async fn send_json(
    router: &Router,
    method: Method,
    uri: &str,
    body: &Value,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    dispatch(router, request).await
}

/// POST with an empty body (the like/view endpoints take none).
pub async fn post_empty(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    dispatch(router, request).await
}
