//! # Core Traits (Ports)
//!
//! Any database plugin must implement this trait to be used by the binary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Category, CategoryWithSubcategories, NewCategory, NewPost, NewProfile, NewSubcategory, Post,
    PostFilter, PostUpdate, PostWithRefs, Profile, Subcategory,
};
use crate::taxonomy::SeedCategory;

/// Data persistence contract for the category taxonomy, profiles, and posts.
#[async_trait]
pub trait CommunityRepo: Send + Sync {
    // Category Operations
    /// All categories with nested subcategories, both levels ordered
    /// alphabetically by localized name.
    async fn list_categories(&self) -> Result<Vec<CategoryWithSubcategories>>;
    async fn create_category(&self, input: NewCategory) -> Result<Category>;
    async fn create_subcategory(&self, input: NewSubcategory) -> Result<Subcategory>;
    /// Idempotent: inserts the seed list only when the table is empty.
    async fn seed_categories(&self, seed: &[SeedCategory]) -> Result<()>;

    // Profile Operations
    async fn create_profile(&self, input: NewProfile) -> Result<Profile>;

    // Post Operations
    /// Validates the input (empty required fields plus unresolved
    /// category/subcategory/author references, reported together) and
    /// inserts a pending post with zeroed counters.
    async fn create_post(&self, input: NewPost) -> Result<Post>;
    /// Conjunctive filtering per [`PostFilter`], newest first, bounded by
    /// the filter's limit/offset.
    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<PostWithRefs>>;
    async fn get_post(&self, id: Uuid) -> Result<Option<PostWithRefs>>;
    /// Partial merge of the provided fields only.
    async fn update_post(&self, id: Uuid, update: PostUpdate) -> Result<()>;

    // Engagement Counters
    //
    // Atomic storage-level increments restricted to approved posts.
    // Deliberately non-idempotent: repeated calls always increment.
    async fn increment_likes(&self, id: Uuid) -> Result<()>;
    async fn increment_views(&self, id: Uuid) -> Result<()>;
}
