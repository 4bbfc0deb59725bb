//! Typed runtime configuration, layered from defaults and `ELAKA_*`
//! environment variables (after `.env` loading).

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// SQLite database URL, e.g. `sqlite:elaka.db` or `sqlite::memory:`.
    pub database_url: String,
    /// Listen address, e.g. `127.0.0.1:8080`.
    pub listen: String,
    /// Seed the category taxonomy at startup when the table is empty.
    pub seed_on_start: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("database_url", "sqlite:elaka.db")?
            .set_default("listen", "127.0.0.1:8080")?
            .set_default("seed_on_start", true)?
            .add_source(config::Environment::with_prefix("ELAKA"))
            .build()?
            .try_deserialize()
    }
}
