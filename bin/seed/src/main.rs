//! # Seed Binary
//!
//! One-shot bootstrap: applies the category taxonomy to the configured
//! database and creates a verified demo profile to author posts with.
//! Safe to run repeatedly; the taxonomy seed is idempotent.

use elaka_core::models::NewProfile;
use elaka_core::taxonomy;
use elaka_core::traits::CommunityRepo;
use elaka_db_sqlite::SqliteCommunityRepo;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let database_url =
        std::env::var("ELAKA_DATABASE_URL").unwrap_or_else(|_| "sqlite:elaka.db".to_string());

    let repo = SqliteCommunityRepo::new(&database_url).await?;
    repo.seed_categories(taxonomy::SEED_CATEGORIES).await?;

    let profile = repo
        .create_profile(NewProfile {
            user_id: Uuid::new_v4(),
            display_name: "এলাকা অ্যাডমিন".to_string(),
            phone: None,
            division: "dhaka".to_string(),
            district: "dhaka".to_string(),
            upazila: "ধানমন্ডি".to_string(),
            is_verified: true,
        })
        .await?;

    tracing::info!(profile_id = %profile.id, "seed complete");
    Ok(())
}
