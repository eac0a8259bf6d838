pub mod models;
pub mod repositories;
pub mod schema;

use std::path::Path;
use std::str::FromStr;

use eyre::{Result, WrapErr};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, Transaction};
use tracing::info;

pub type DbPool = Pool<Sqlite>;

/// Handle to the one SQLite connection shared by the whole process.
///
/// Built once at startup and cloned into whoever needs storage. The pool is
/// capped at a single connection that never idles out, so statements are
/// serialized by SQLite and an in-memory database lives as long as the
/// handle.
#[derive(Debug, Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open (creating if needed) the database file at `path` and make sure
    /// the schema exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .wrap_err_with(|| format!("Failed to create database directory {}", parent.display()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        info!("Opening database at {}", path.display());
        Self::connect_with(options).await
    }

    /// A private in-memory database, gone once the handle is closed.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        Self::connect_with(options).await
    }

    async fn connect_with(options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .wrap_err("Failed to connect to database")?;

        schema::initialize_database(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Start a transaction. It commits only through `commit()`; dropping it
    /// (for instance on an early `?` return) rolls it back.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .wrap_err("Failed to start transaction")
    }

    /// Release the connection. Later calls are no-ops.
    pub async fn close(&self) {
        if self.pool.is_closed() {
            return;
        }
        self.pool.close().await;
        info!("Database connection closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
