//! Database Module
//!
//! Handles SQLite connection pools and migrations

pub mod repository;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::utils::AppError;

/// Database service with separate read and write pools
#[derive(Clone)]
pub struct DbService {
    read_pool: SqlitePool,
    write_pool: SqlitePool,
}

impl DbService {
    /// Create a new database service with WAL mode and separate read/write pools
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        if let Some(parent) = std::path::Path::new(db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::database(format!("Failed to create database directory: {e}")))?;
        }

        // Build connection options: WAL, foreign keys, normal sync
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON")
            .busy_timeout(Duration::from_secs(5))
            .optimize_on_close(true, None);

        // All statements that modify data go through a single connection,
        // so order creation and status updates are serialized.
        let write_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let read_pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        // Run migrations (ignore previously applied but now removed migrations)
        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(&write_pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self {
            read_pool,
            write_pool,
        })
    }

    /// Pool for read-only queries
    pub fn read(&self) -> &SqlitePool {
        &self.read_pool
    }

    /// Pool for statements that modify data (single connection)
    pub fn write(&self) -> &SqlitePool {
        &self.write_pool
    }
}
