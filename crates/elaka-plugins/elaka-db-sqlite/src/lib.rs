//! # elaka-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational
//! model and the `elaka-core` domain models: the persisted category
//! taxonomy, author profiles, and the filtered post listings.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use elaka_core::error::{AppError, Result};
use elaka_core::models::{
    Category, CategoryWithSubcategories, NewCategory, NewPost, NewProfile, NewSubcategory, Post,
    PostFilter, PostStatus, PostUpdate, PostWithRefs, Profile, Subcategory,
};
use elaka_core::models::{AuthorRef, TaxonomyRef};
use elaka_core::taxonomy::SeedCategory;
use elaka_core::traits::CommunityRepo;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use uuid::Uuid;

/// Schema for the four tables. UUIDs are stored as hyphenated TEXT,
/// timestamps as UTC TEXT. Location strings on posts are deliberately
/// denormalized (no FK into the location taxonomy).
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    name_en     TEXT NOT NULL,
    icon        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS subcategories (
    id          TEXT PRIMARY KEY,
    category_id TEXT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
    name        TEXT NOT NULL,
    name_en     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS profiles (
    id                 TEXT PRIMARY KEY,
    user_id            TEXT NOT NULL UNIQUE,
    display_name       TEXT NOT NULL,
    phone              TEXT,
    division           TEXT NOT NULL,
    district           TEXT NOT NULL,
    upazila            TEXT NOT NULL,
    is_verified        INTEGER NOT NULL DEFAULT 0,
    contribution_score INTEGER NOT NULL DEFAULT 0,
    created_at         TEXT NOT NULL,
    updated_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS posts (
    id             TEXT PRIMARY KEY,
    title          TEXT NOT NULL,
    content        TEXT NOT NULL,
    division       TEXT NOT NULL,
    district       TEXT NOT NULL,
    upazila        TEXT NOT NULL,
    category_id    TEXT NOT NULL REFERENCES categories(id) ON DELETE RESTRICT,
    subcategory_id TEXT NOT NULL REFERENCES subcategories(id) ON DELETE RESTRICT,
    author_id      TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
    phone          TEXT,
    image_url      TEXT,
    status         TEXT NOT NULL DEFAULT 'pending',
    feedback       TEXT,
    views          INTEGER NOT NULL DEFAULT 0,
    likes          INTEGER NOT NULL DEFAULT 0,
    comments       INTEGER NOT NULL DEFAULT 0,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL,
    approved_at    TEXT
);

CREATE INDEX IF NOT EXISTS idx_posts_status_created ON posts(status, created_at DESC);
CREATE INDEX IF NOT EXISTS idx_subcategories_category ON subcategories(category_id);
"#;

const POST_SELECT: &str = "SELECT p.id, p.title, p.content, p.division, p.district, p.upazila, \
     p.category_id, p.subcategory_id, p.author_id, p.phone, p.image_url, p.status, p.feedback, \
     p.views, p.likes, p.comments, p.created_at, p.updated_at, p.approved_at, \
     pr.display_name AS author_name, \
     c.name AS category_name, c.name_en AS category_name_en, \
     s.name AS subcategory_name, s.name_en AS subcategory_name_en \
     FROM posts p \
     LEFT JOIN profiles pr ON pr.id = p.author_id \
     LEFT JOIN categories c ON c.id = p.category_id \
     LEFT JOIN subcategories s ON s.id = p.subcategory_id";

pub struct SqliteCommunityRepo {
    pool: SqlitePool,
}

// Helper for UUID conversion; rows we wrote always hold valid ids.
fn text_to_uuid(text: &str) -> Uuid {
    Uuid::parse_str(text).unwrap_or_default()
}

fn storage_err(err: sqlx::Error) -> AppError {
    tracing::error!(error = %err, "database failure");
    AppError::Storage(err.to_string())
}

fn post_from_row(row: &SqliteRow) -> PostWithRefs {
    PostWithRefs {
        post: Post {
            id: text_to_uuid(&row.get::<String, _>("id")),
            title: row.get("title"),
            content: row.get("content"),
            division: row.get("division"),
            district: row.get("district"),
            upazila: row.get("upazila"),
            category_id: text_to_uuid(&row.get::<String, _>("category_id")),
            subcategory_id: text_to_uuid(&row.get::<String, _>("subcategory_id")),
            author_id: text_to_uuid(&row.get::<String, _>("author_id")),
            phone: row.get("phone"),
            image_url: row.get("image_url"),
            status: row.get::<String, _>("status").parse().unwrap_or_default(),
            feedback: row.get("feedback"),
            views: row.get("views"),
            likes: row.get("likes"),
            comments: row.get("comments"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            approved_at: row.get("approved_at"),
        },
        author: AuthorRef {
            display_name: row
                .get::<Option<String>, _>("author_name")
                .unwrap_or_else(|| "Unknown".to_string()),
        },
        category: TaxonomyRef {
            name: row
                .get::<Option<String>, _>("category_name")
                .unwrap_or_else(|| "Unknown".to_string()),
            name_en: row
                .get::<Option<String>, _>("category_name_en")
                .unwrap_or_else(|| "Unknown".to_string()),
        },
        subcategory: TaxonomyRef {
            name: row
                .get::<Option<String>, _>("subcategory_name")
                .unwrap_or_else(|| "Unknown".to_string()),
            name_en: row
                .get::<Option<String>, _>("subcategory_name_en")
                .unwrap_or_else(|| "Unknown".to_string()),
        },
    }
}

/// Appends the conjunctive WHERE clause for a [`PostFilter`].
/// Absent status defaults to approved; search matches case-insensitively
/// as a substring of title OR content.
fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &PostFilter) {
    qb.push(" WHERE p.status = ");
    qb.push_bind(filter.effective_status().as_str());

    if let Some(category_id) = filter.category_id {
        qb.push(" AND p.category_id = ");
        qb.push_bind(category_id.to_string());
    }
    if let Some(subcategory_id) = filter.subcategory_id {
        qb.push(" AND p.subcategory_id = ");
        qb.push_bind(subcategory_id.to_string());
    }
    if let Some(division) = &filter.division {
        qb.push(" AND p.division = ");
        qb.push_bind(division.clone());
    }
    if let Some(district) = &filter.district {
        qb.push(" AND p.district = ");
        qb.push_bind(district.clone());
    }
    if let Some(upazila) = &filter.upazila {
        qb.push(" AND p.upazila = ");
        qb.push_bind(upazila.clone());
    }
    if let Some(search) = &filter.search {
        if !search.is_empty() {
            let pattern = format!("%{}%", search.to_lowercase());
            qb.push(" AND (lower(p.title) LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR lower(p.content) LIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
    }
}

impl SqliteCommunityRepo {
    /// Opens (creating if missing) the database at `url` and applies the
    /// schema. In-memory databases are pinned to a single connection so
    /// every pooled handle sees the same data.
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(storage_err)?
            .create_if_missing(true)
            .foreign_keys(true);

        let max_connections = if url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(storage_err)?;

        sqlx::raw_sql(SCHEMA)
            .execute(&pool)
            .await
            .map_err(storage_err)?;

        Ok(Self { pool })
    }

    async fn id_exists(&self, table: &str, id: Uuid) -> Result<bool> {
        // `table` is always one of our own literals, never caller input.
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?)");
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err)
    }

    /// Atomic `counter = counter + 1` on an approved post. The original
    /// prototype read-then-wrote the counter and could lose increments
    /// under concurrency; a single UPDATE cannot.
    async fn bump_counter(&self, column: &'static str, id: Uuid) -> Result<()> {
        let sql = format!(
            "UPDATE posts SET {column} = {column} + 1 WHERE id = ? AND status = 'approved'"
        );
        let result = sqlx::query(&sql)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        if result.rows_affected() == 0 {
            return Err(AppError::post_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl CommunityRepo for SqliteCommunityRepo {
    async fn list_categories(&self) -> Result<Vec<CategoryWithSubcategories>> {
        let category_rows = sqlx::query("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        let subcategory_rows = sqlx::query("SELECT * FROM subcategories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        let subcategories: Vec<Subcategory> = subcategory_rows
            .iter()
            .map(|row| Subcategory {
                id: text_to_uuid(&row.get::<String, _>("id")),
                category_id: text_to_uuid(&row.get::<String, _>("category_id")),
                name: row.get("name"),
                name_en: row.get("name_en"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(category_rows
            .iter()
            .map(|row| {
                let category = Category {
                    id: text_to_uuid(&row.get::<String, _>("id")),
                    name: row.get("name"),
                    name_en: row.get("name_en"),
                    icon: row.get("icon"),
                    created_at: row.get("created_at"),
                };
                let nested = subcategories
                    .iter()
                    .filter(|s| s.category_id == category.id)
                    .cloned()
                    .collect();
                CategoryWithSubcategories {
                    category,
                    subcategories: nested,
                }
            })
            .collect())
    }

    async fn create_category(&self, input: NewCategory) -> Result<Category> {
        let category = Category {
            id: Uuid::new_v4(),
            name: input.name,
            name_en: input.name_en,
            icon: input.icon,
            created_at: Utc::now(),
        };
        sqlx::query("INSERT INTO categories (id, name, name_en, icon, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(category.id.to_string())
            .bind(&category.name)
            .bind(&category.name_en)
            .bind(&category.icon)
            .bind(category.created_at)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(category)
    }

    async fn create_subcategory(&self, input: NewSubcategory) -> Result<Subcategory> {
        if !self.id_exists("categories", input.category_id).await? {
            return Err(AppError::NotFound(
                "category".into(),
                input.category_id.to_string(),
            ));
        }
        let subcategory = Subcategory {
            id: Uuid::new_v4(),
            category_id: input.category_id,
            name: input.name,
            name_en: input.name_en,
            created_at: Utc::now(),
        };
        sqlx::query("INSERT INTO subcategories (id, category_id, name, name_en, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(subcategory.id.to_string())
            .bind(subcategory.category_id.to_string())
            .bind(&subcategory.name)
            .bind(&subcategory.name_en)
            .bind(subcategory.created_at)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(subcategory)
    }

    /// # Developer Note
    /// Runs inside a transaction so a crash mid-seed can never leave a
    /// category without its subcategories.
    async fn seed_categories(&self, seed: &[SeedCategory]) -> Result<()> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_err)?;
        if existing > 0 {
            tracing::debug!(existing, "categories already seeded, skipping");
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(storage_err)?;
        let now = Utc::now();
        for category in seed {
            let category_id = Uuid::new_v4();
            sqlx::query("INSERT INTO categories (id, name, name_en, icon, created_at) VALUES (?, ?, ?, ?, ?)")
                .bind(category_id.to_string())
                .bind(category.name)
                .bind(category.name_en)
                .bind(category.icon)
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(storage_err)?;

            for subcategory in category.subcategories {
                sqlx::query("INSERT INTO subcategories (id, category_id, name, name_en, created_at) VALUES (?, ?, ?, ?, ?)")
                    .bind(Uuid::new_v4().to_string())
                    .bind(category_id.to_string())
                    .bind(subcategory.name)
                    .bind(subcategory.name_en)
                    .bind(now)
                    .execute(&mut *tx)
                    .await
                    .map_err(storage_err)?;
            }
        }
        tx.commit().await.map_err(storage_err)?;
        tracing::info!(categories = seed.len(), "seeded category taxonomy");
        Ok(())
    }

    async fn create_profile(&self, input: NewProfile) -> Result<Profile> {
        let now = Utc::now();
        let profile = Profile {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            display_name: input.display_name,
            phone: input.phone,
            division: input.division,
            district: input.district,
            upazila: input.upazila,
            is_verified: input.is_verified,
            contribution_score: 0,
            created_at: now,
            updated_at: now,
        };
        sqlx::query(
            "INSERT INTO profiles (id, user_id, display_name, phone, division, district, upazila, \
             is_verified, contribution_score, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(profile.id.to_string())
        .bind(profile.user_id.to_string())
        .bind(&profile.display_name)
        .bind(&profile.phone)
        .bind(&profile.division)
        .bind(&profile.district)
        .bind(&profile.upazila)
        .bind(profile.is_verified)
        .bind(profile.contribution_score)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;
        Ok(profile)
    }

    async fn create_post(&self, input: NewPost) -> Result<Post> {
        // Collect every violation before failing: empty required text
        // fields first, then unresolved references.
        let mut fields = input.empty_fields();
        if !self.id_exists("categories", input.category_id).await? {
            fields.push("categoryId".to_string());
        }
        if !self.id_exists("subcategories", input.subcategory_id).await? {
            fields.push("subcategoryId".to_string());
        }
        if !self.id_exists("profiles", input.author_id).await? {
            fields.push("authorId".to_string());
        }
        if !fields.is_empty() {
            return Err(AppError::Validation(fields));
        }

        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            division: input.division,
            district: input.district,
            upazila: input.upazila,
            category_id: input.category_id,
            subcategory_id: input.subcategory_id,
            author_id: input.author_id,
            phone: input.phone,
            image_url: input.image_url,
            status: PostStatus::Pending,
            feedback: None,
            views: 0,
            likes: 0,
            comments: 0,
            created_at: now,
            updated_at: now,
            approved_at: None,
        };

        sqlx::query(
            "INSERT INTO posts (id, title, content, division, district, upazila, category_id, \
             subcategory_id, author_id, phone, image_url, status, feedback, views, likes, \
             comments, created_at, updated_at, approved_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(post.id.to_string())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.division)
        .bind(&post.district)
        .bind(&post.upazila)
        .bind(post.category_id.to_string())
        .bind(post.subcategory_id.to_string())
        .bind(post.author_id.to_string())
        .bind(&post.phone)
        .bind(&post.image_url)
        .bind(post.status.as_str())
        .bind(&post.feedback)
        .bind(post.views)
        .bind(post.likes)
        .bind(post.comments)
        .bind(post.created_at)
        .bind(post.updated_at)
        .bind(post.approved_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        tracing::info!(post_id = %post.id, "created post (pending review)");
        Ok(post)
    }

    async fn list_posts(&self, filter: PostFilter) -> Result<Vec<PostWithRefs>> {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(POST_SELECT);
        push_filter(&mut qb, &filter);
        qb.push(" ORDER BY p.created_at DESC LIMIT ");
        qb.push_bind(filter.effective_limit());
        qb.push(" OFFSET ");
        qb.push_bind(filter.effective_offset());

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(rows.iter().map(post_from_row).collect())
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<PostWithRefs>> {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(POST_SELECT);
        qb.push(" WHERE p.id = ");
        qb.push_bind(id.to_string());

        let row = qb
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(row.as_ref().map(post_from_row))
    }

    async fn update_post(&self, id: Uuid, update: PostUpdate) -> Result<()> {
        if update.is_empty() {
            // Nothing to merge; still report a missing id.
            if !self.id_exists("posts", id).await? {
                return Err(AppError::post_not_found(id));
            }
            return Ok(());
        }

        let now = Utc::now();
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("UPDATE posts SET updated_at = ");
        qb.push_bind(now);

        if let Some(title) = &update.title {
            qb.push(", title = ");
            qb.push_bind(title.clone());
        }
        if let Some(content) = &update.content {
            qb.push(", content = ");
            qb.push_bind(content.clone());
        }
        if let Some(phone) = &update.phone {
            qb.push(", phone = ");
            qb.push_bind(phone.clone());
        }
        if let Some(image_url) = &update.image_url {
            qb.push(", image_url = ");
            qb.push_bind(image_url.clone());
        }
        if let Some(status) = update.status {
            qb.push(", status = ");
            qb.push_bind(status.as_str());
            if status == PostStatus::Approved {
                qb.push(", approved_at = ");
                qb.push_bind(now);
            }
        }
        if let Some(feedback) = &update.feedback {
            qb.push(", feedback = ");
            qb.push_bind(feedback.clone());
        }
        if let Some(likes) = update.likes {
            qb.push(", likes = ");
            qb.push_bind(likes);
        }
        if let Some(views) = update.views {
            qb.push(", views = ");
            qb.push_bind(views);
        }
        if let Some(comments) = update.comments {
            qb.push(", comments = ");
            qb.push_bind(comments);
        }

        qb.push(" WHERE id = ");
        qb.push_bind(id.to_string());

        let result = qb.build().execute(&self.pool).await.map_err(storage_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::post_not_found(id));
        }
        Ok(())
    }

    async fn increment_likes(&self, id: Uuid) -> Result<()> {
        self.bump_counter("likes", id).await
    }

    async fn increment_views(&self, id: Uuid) -> Result<()> {
        self.bump_counter("views", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn repo() -> SqliteCommunityRepo {
        SqliteCommunityRepo::new("sqlite::memory:")
            .await
            .expect("failed to init in-memory SQLite")
    }

    struct Fixture {
        repo: SqliteCommunityRepo,
        category_id: Uuid,
        subcategory_id: Uuid,
        author_id: Uuid,
    }

    /// Seeds the "স্থানীয় সেবা" (Local Services) category with a "ডাক্তার"
    /// (Doctor) subcategory plus one author profile.
    async fn fixture() -> Fixture {
        let repo = repo().await;
        let category = repo
            .create_category(NewCategory {
                name: "স্থানীয় সেবা".into(),
                name_en: "Local Services".into(),
                icon: "🧰".into(),
            })
            .await
            .unwrap();
        let subcategory = repo
            .create_subcategory(NewSubcategory {
                category_id: category.id,
                name: "ডাক্তার".into(),
                name_en: "Doctor".into(),
            })
            .await
            .unwrap();
        let author = repo
            .create_profile(NewProfile {
                user_id: Uuid::new_v4(),
                display_name: "রহিম মিয়া".into(),
                phone: Some("01711111111".into()),
                division: "dhaka".into(),
                district: "dhaka".into(),
                upazila: "উত্তরা".into(),
                is_verified: true,
            })
            .await
            .unwrap();

        Fixture {
            repo,
            category_id: category.id,
            subcategory_id: subcategory.id,
            author_id: author.id,
        }
    }

    fn new_post(fx: &Fixture, title: &str, content: &str) -> NewPost {
        NewPost {
            title: title.into(),
            content: content.into(),
            division: "dhaka".into(),
            district: "dhaka".into(),
            upazila: "উত্তরা".into(),
            category_id: fx.category_id,
            subcategory_id: fx.subcategory_id,
            author_id: fx.author_id,
            phone: None,
            image_url: None,
        }
    }

    async fn approve(fx: &Fixture, id: Uuid) {
        fx.repo
            .update_post(
                id,
                PostUpdate {
                    status: Some(PostStatus::Approved),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn created_posts_start_pending_with_zero_counters() {
        let fx = fixture().await;
        let post = fx
            .repo
            .create_post(new_post(&fx, "নতুন চেম্বার", "ডাক্তার বসেন সন্ধ্যায়"))
            .await
            .unwrap();

        assert_eq!(post.status, PostStatus::Pending);
        assert_eq!((post.views, post.likes, post.comments), (0, 0, 0));
        assert!(post.approved_at.is_none());
    }

    #[tokio::test]
    async fn create_rejects_empty_title_by_name() {
        let fx = fixture().await;
        let mut input = new_post(&fx, "", "some content");
        input.title = "".into();

        let err = fx.repo.create_post(input).await.unwrap_err();
        match err {
            AppError::Validation(fields) => assert_eq!(fields, vec!["title"]),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_reports_unresolved_references_together() {
        let fx = fixture().await;
        let mut input = new_post(&fx, "ok", "ok");
        input.category_id = Uuid::new_v4();
        input.author_id = Uuid::new_v4();

        let err = fx.repo.create_post(input).await.unwrap_err();
        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields, vec!["categoryId", "authorId"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn default_listing_only_shows_approved_posts() {
        let fx = fixture().await;
        let approved = fx.repo.create_post(new_post(&fx, "approved", "a")).await.unwrap();
        let rejected = fx.repo.create_post(new_post(&fx, "rejected", "b")).await.unwrap();
        let _pending = fx.repo.create_post(new_post(&fx, "pending", "c")).await.unwrap();

        approve(&fx, approved.id).await;
        fx.repo
            .update_post(
                rejected.id,
                PostUpdate {
                    status: Some(PostStatus::Rejected),
                    feedback: Some("তথ্য যাচাই করা যায়নি".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let listed = fx.repo.list_posts(PostFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].post.id, approved.id);
    }

    #[tokio::test]
    async fn filters_compose_conjunctively() {
        let fx = fixture().await;

        let mut in_uttara = new_post(&fx, "উত্তরার ডাক্তার", "চেম্বার খোলা");
        in_uttara.upazila = "উত্তরা".into();
        let mut in_mirpur = new_post(&fx, "মিরপুরের ডাক্তার", "চেম্বার খোলা");
        in_mirpur.upazila = "মিরপুর".into();

        let a = fx.repo.create_post(in_uttara).await.unwrap();
        let b = fx.repo.create_post(in_mirpur).await.unwrap();
        approve(&fx, a.id).await;
        approve(&fx, b.id).await;

        let by_category = PostFilter {
            category_id: Some(fx.category_id),
            ..Default::default()
        };
        let by_upazila = PostFilter {
            upazila: Some("উত্তরা".into()),
            ..Default::default()
        };
        let combined = PostFilter {
            category_id: Some(fx.category_id),
            upazila: Some("উত্তরা".into()),
            ..Default::default()
        };

        let ids = |posts: Vec<PostWithRefs>| {
            let mut v: Vec<Uuid> = posts.into_iter().map(|p| p.post.id).collect();
            v.sort();
            v
        };

        let category_ids = ids(fx.repo.list_posts(by_category).await.unwrap());
        let upazila_ids = ids(fx.repo.list_posts(by_upazila).await.unwrap());
        let combined_ids = ids(fx.repo.list_posts(combined).await.unwrap());

        let intersection: Vec<Uuid> = category_ids
            .iter()
            .copied()
            .filter(|id| upazila_ids.contains(id))
            .collect();
        assert_eq!(combined_ids, intersection);
        assert_eq!(combined_ids, vec![a.id]);
    }

    #[tokio::test]
    async fn search_matches_title_or_content_case_insensitively() {
        let fx = fixture().await;
        let in_title = fx
            .repo
            .create_post(new_post(&fx, "Electricity Notice", "তথ্য নেই"))
            .await
            .unwrap();
        let in_content = fx
            .repo
            .create_post(new_post(&fx, "নোটিশ", "আজ বিদ্যুৎ থাকবে না"))
            .await
            .unwrap();
        let unrelated = fx
            .repo
            .create_post(new_post(&fx, "হাট বসবে", "শুক্রবার সকালে"))
            .await
            .unwrap();
        for id in [in_title.id, in_content.id, unrelated.id] {
            approve(&fx, id).await;
        }

        let hits = fx
            .repo
            .list_posts(PostFilter {
                search: Some("ELECTRICITY".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].post.id, in_title.id);

        let hits = fx
            .repo
            .list_posts(PostFilter {
                search: Some("বিদ্যুৎ".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].post.id, in_content.id);

        let misses = fx
            .repo
            .list_posts(PostFilter {
                search: Some("অ্যাম্বুলেন্স".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn like_increments_by_exactly_one() {
        let fx = fixture().await;
        let post = fx.repo.create_post(new_post(&fx, "title", "content")).await.unwrap();
        approve(&fx, post.id).await;

        let before = fx.repo.get_post(post.id).await.unwrap().unwrap();
        fx.repo.increment_likes(post.id).await.unwrap();
        let after = fx.repo.get_post(post.id).await.unwrap().unwrap();

        assert_eq!(after.post.likes, before.post.likes + 1);
        assert_eq!(after.post.views, before.post.views);
        assert_eq!(after.post.comments, before.post.comments);
        assert_eq!(after.post.title, before.post.title);
        assert_eq!(after.post.updated_at, before.post.updated_at);

        // no idempotency: a second call increments again
        fx.repo.increment_likes(post.id).await.unwrap();
        let again = fx.repo.get_post(post.id).await.unwrap().unwrap();
        assert_eq!(again.post.likes, before.post.likes + 2);
    }

    #[tokio::test]
    async fn counters_refuse_unapproved_or_missing_posts() {
        let fx = fixture().await;
        let pending = fx.repo.create_post(new_post(&fx, "t", "c")).await.unwrap();

        assert!(matches!(
            fx.repo.increment_views(pending.id).await,
            Err(AppError::NotFound(..))
        ));
        assert!(matches!(
            fx.repo.increment_likes(Uuid::new_v4()).await,
            Err(AppError::NotFound(..))
        ));
    }

    #[tokio::test]
    async fn update_merges_only_provided_fields() {
        let fx = fixture().await;
        let post = fx.repo.create_post(new_post(&fx, "পুরনো শিরোনাম", "বিষয়বস্তু")).await.unwrap();

        fx.repo
            .update_post(
                post.id,
                PostUpdate {
                    title: Some("নতুন শিরোনাম".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = fx.repo.get_post(post.id).await.unwrap().unwrap();
        assert_eq!(updated.post.title, "নতুন শিরোনাম");
        assert_eq!(updated.post.content, "বিষয়বস্তু");
        assert_eq!(updated.post.status, PostStatus::Pending);

        assert!(matches!(
            fx.repo.update_post(Uuid::new_v4(), PostUpdate::default()).await,
            Err(AppError::NotFound(..))
        ));
    }

    #[tokio::test]
    async fn approving_stamps_approved_at() {
        let fx = fixture().await;
        let post = fx.repo.create_post(new_post(&fx, "t", "c")).await.unwrap();
        approve(&fx, post.id).await;

        let approved = fx.repo.get_post(post.id).await.unwrap().unwrap();
        assert_eq!(approved.post.status, PostStatus::Approved);
        assert!(approved.post.approved_at.is_some());
    }

    #[tokio::test]
    async fn pending_scenario_round_trip() {
        let fx = fixture().await;
        let created = fx
            .repo
            .create_post(new_post(&fx, "ডাক্তার চাই", "উত্তরায় শিশু ডাক্তার দরকার"))
            .await
            .unwrap();

        let found = fx
            .repo
            .list_posts(PostFilter {
                status: Some(PostStatus::Pending),
                category_id: Some(fx.category_id),
                subcategory_id: Some(fx.subcategory_id),
                division: Some("dhaka".into()),
                district: Some("dhaka".into()),
                upazila: Some("উত্তরা".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].post.id, created.id);
        assert_eq!(found[0].category.name, "স্থানীয় সেবা");
        assert_eq!(found[0].subcategory.name_en, "Doctor");
        assert_eq!(found[0].author.display_name, "রহিম মিয়া");
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_paginated() {
        let fx = fixture().await;
        let mut ids = Vec::new();
        for i in 0..3 {
            let post = fx
                .repo
                .create_post(new_post(&fx, &format!("post {i}"), "content"))
                .await
                .unwrap();
            approve(&fx, post.id).await;
            ids.push(post.id);
            // distinct created_at so the ordering is deterministic
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let listed = fx.repo.list_posts(PostFilter::default()).await.unwrap();
        let listed_ids: Vec<Uuid> = listed.iter().map(|p| p.post.id).collect();
        assert_eq!(listed_ids, vec![ids[2], ids[1], ids[0]]);

        let page = fx
            .repo
            .list_posts(PostFilter {
                limit: Some(1),
                offset: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].post.id, ids[1]);
    }

    #[tokio::test]
    async fn categories_list_alphabetically_with_nesting() {
        let repo = repo().await;
        repo.seed_categories(elaka_core::taxonomy::SEED_CATEGORIES)
            .await
            .unwrap();
        // second seed is a no-op
        repo.seed_categories(elaka_core::taxonomy::SEED_CATEGORIES)
            .await
            .unwrap();

        let categories = repo.list_categories().await.unwrap();
        assert_eq!(categories.len(), 5);
        let names: Vec<&str> = categories.iter().map(|c| c.category.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let emergency = categories
            .iter()
            .find(|c| c.category.name_en == "Emergency Info")
            .unwrap();
        assert_eq!(emergency.subcategories.len(), 7);
        assert!(emergency
            .subcategories
            .iter()
            .all(|s| s.category_id == emergency.category.id));
    }
}
