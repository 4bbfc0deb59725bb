//! # Elaka Binary
//!
//! The entry point that assembles the application based on compile-time
//! features: database plugin, API router, configuration.

use std::sync::Arc;

use elaka_api::AppState;
use elaka_core::taxonomy;
use elaka_core::traits::CommunityRepo;
use tracing_subscriber::EnvFilter;

mod config;
use config::AppConfig;

// Feature-gated imports: the binary is compiled to order.
#[cfg(feature = "db-sqlite")]
use elaka_db_sqlite::SqliteCommunityRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = AppConfig::load()?;

    // 1. Initialize Database Implementation
    #[cfg(feature = "db-sqlite")]
    let repo = SqliteCommunityRepo::new(&cfg.database_url).await?;

    // 2. Seed the category taxonomy (no-op when already populated)
    if cfg.seed_on_start {
        repo.seed_categories(taxonomy::SEED_CATEGORIES).await?;
    }

    // 3. Wrap in AppState (dynamic dispatch keeps the API crate
    //    independent of the chosen database plugin)
    let state = AppState {
        repo: Arc::new(repo),
    };

    let app = elaka_api::router(state);
    let listener = tokio::net::TcpListener::bind(&cfg.listen).await?;
    tracing::info!(addr = %cfg.listen, "elaka listening");
    axum::serve(listener, app).await?;

    Ok(())
}
