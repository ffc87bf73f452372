//! Connection pool setup and backend selection.
//!
//! The backend is chosen from the `DATABASE_URL` scheme: `postgres://` /
//! `postgresql://` use PostgreSQL, `sqlite:` uses SQLite. Each backend has its
//! own embedded migration set.

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::{PgUrlRepository, SqliteUrlRepository};
use crate::config::Config;
use crate::domain::repositories::UrlRepository;

/// A connected pool for one of the supported backends.
#[derive(Debug, Clone)]
pub enum Database {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Database {
    /// Opens a pool for `config.database_url` using the configured pool limits.
    ///
    /// SQLite database files are created if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL scheme is unsupported or the connection fails.
    pub async fn connect(config: &Config) -> Result<Self> {
        let url = config.database_url.as_str();

        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            return Ok(Self::Postgres(pool));
        }

        if url.starts_with("sqlite:") {
            let options = SqliteConnectOptions::from_str(url)
                .context("Invalid SQLite connection string")?
                .create_if_missing(true);
            let pool = SqlitePoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .connect_with(options)
                .await
                .context("Failed to open SQLite database")?;
            return Ok(Self::Sqlite(pool));
        }

        anyhow::bail!("Unsupported DATABASE_URL scheme: '{}'", url)
    }

    /// Applies the embedded migrations for this backend.
    pub async fn migrate(&self) -> Result<()> {
        let result = match self {
            Self::Postgres(pool) => sqlx::migrate!("./migrations/postgres").run(pool).await,
            Self::Sqlite(pool) => sqlx::migrate!("./migrations/sqlite").run(pool).await,
        };

        result.context("Failed to run migrations")
    }

    /// Builds the URL repository backed by this pool.
    pub fn url_repository(&self) -> Arc<dyn UrlRepository> {
        match self {
            Self::Postgres(pool) => Arc::new(PgUrlRepository::new(Arc::new(pool.clone()))),
            Self::Sqlite(pool) => Arc::new(SqliteUrlRepository::new(Arc::new(pool.clone()))),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Sqlite(_) => "sqlite",
        }
    }

    /// Waits for checked-out connections to be returned and closes the pool.
    pub async fn close(&self) {
        match self {
            Self::Postgres(pool) => pool.close().await,
            Self::Sqlite(pool) => pool.close().await,
        }
    }
}
