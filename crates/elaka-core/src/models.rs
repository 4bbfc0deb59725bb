//! # Domain Models
//!
//! These structs represent the core entities of Elaka: the two-level
//! category taxonomy, author profiles, and the moderated community posts
//! that tie both together with a denormalized location triple.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Moderation state of a [`Post`]. Only approved posts are visible in
/// default listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Pending => "pending",
            PostStatus::Approved => "approved",
            PostStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PostStatus::Pending),
            "approved" => Ok(PostStatus::Approved),
            "rejected" => Ok(PostStatus::Rejected),
            other => Err(format!("unknown post status: {other}")),
        }
    }
}

/// A top-level post category (e.g., জরুরি তথ্য / Emergency Info).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    /// Localized (Bengali) display name.
    pub name: String,
    pub name_en: String,
    /// Display icon, stored as an emoji glyph.
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

/// A second-level classification under exactly one [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub name_en: String,
    pub created_at: DateTime<Utc>,
}

/// A category with its subcategories nested, the shape served by
/// `GET /api/categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithSubcategories {
    #[serde(flatten)]
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
}

/// Input for creating a category (administrative seeding).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub name_en: String,
    pub icon: String,
}

/// Input for creating a subcategory under an existing category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubcategory {
    pub category_id: Uuid,
    pub name: String,
    pub name_en: String,
}

/// Author metadata, one-to-one with an account identity created at signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub display_name: String,
    pub phone: Option<String>,
    pub division: String,
    pub district: String,
    pub upazila: String,
    pub is_verified: bool,
    pub contribution_score: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a profile (signup is an external collaborator;
/// this exists for seeding and tests).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub user_id: Uuid,
    pub display_name: String,
    pub phone: Option<String>,
    pub division: String,
    pub district: String,
    pub upazila: String,
    #[serde(default)]
    pub is_verified: bool,
}

/// The central entity: a user-submitted piece of local information,
/// gated by moderation status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Denormalized location strings; no referential integrity against
    /// the location taxonomy.
    pub division: String,
    pub district: String,
    pub upazila: String,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    pub author_id: Uuid,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub status: PostStatus,
    /// Moderator feedback, set on rejection.
    pub feedback: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

/// Joined author display field attached to listed posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    pub display_name: String,
}

/// Joined taxonomy display fields attached to listed posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyRef {
    pub name: String,
    pub name_en: String,
}

/// A post joined with its author/category/subcategory display fields,
/// the shape served by `GET /api/posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithRefs {
    #[serde(flatten)]
    pub post: Post,
    pub author: AuthorRef,
    pub category: TaxonomyRef,
    pub subcategory: TaxonomyRef,
}

/// Creation input for a post. Status and counters are never caller-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub division: String,
    pub district: String,
    pub upazila: String,
    pub category_id: Uuid,
    pub subcategory_id: Uuid,
    pub author_id: Uuid,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewPost {
    /// Names of every required text field that is empty or whitespace.
    /// Reference resolution (category/subcategory/author) is the
    /// repository's half of validation; the two lists are merged into a
    /// single `AppError::Validation`.
    pub fn empty_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        for (name, value) in [
            ("title", &self.title),
            ("content", &self.content),
            ("division", &self.division),
            ("district", &self.district),
            ("upazila", &self.upazila),
        ] {
            if value.trim().is_empty() {
                fields.push(name.to_string());
            }
        }
        fields
    }
}

/// Partial update for `PATCH /api/posts/{id}`: only provided fields are
/// merged, everything else is left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<PostStatus>,
    pub feedback: Option<String>,
    pub likes: Option<i64>,
    pub views: Option<i64>,
    pub comments: Option<i64>,
}

impl PostUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.phone.is_none()
            && self.image_url.is_none()
            && self.status.is_none()
            && self.feedback.is_none()
            && self.likes.is_none()
            && self.views.is_none()
            && self.comments.is_none()
    }
}

/// Treats an empty query value (`?status=&division=`) as an absent
/// constraint: clients submit the full parameter list with blanks for
/// whatever the user left unselected.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Conjunctive post filter. Field names match the query-string keys of
/// `GET /api/posts` verbatim; empty values mean "no constraint".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<PostStatus>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub subcategory_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub division: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub upazila: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<i64>,
}

/// Default page size for post listings.
pub const DEFAULT_PAGE_SIZE: i64 = 50;
/// Hard cap on page size regardless of what the caller asks for.
pub const MAX_PAGE_SIZE: i64 = 100;

impl PostFilter {
    /// Absent status means approved-only: pending and rejected posts never
    /// leak into default listings.
    pub fn effective_status(&self) -> PostStatus {
        self.status.unwrap_or(PostStatus::Approved)
    }

    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn effective_offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}
