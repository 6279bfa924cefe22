// ABOUTME: Data layer and persistence for Tagkeep
// ABOUTME: SQLite connection setup, embedded migrations, and the shared storage error type

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::migrate::Migrator;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use thiserror::Error;
use tracing::{debug, info};

/// Migrations embedded from `packages/storage/migrations`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

// SQLite extended result codes
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";
const SQLITE_CONSTRAINT_PRIMARYKEY: &str = "1555";
const SQLITE_CONSTRAINT_FOREIGNKEY: &str = "787";

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Invalid storage configuration: {0}")]
    InvalidConfig(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// The write was rejected by a UNIQUE or PRIMARY KEY constraint
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self.sqlite_code().as_deref(),
            Some(SQLITE_CONSTRAINT_UNIQUE) | Some(SQLITE_CONSTRAINT_PRIMARYKEY)
        )
    }

    /// The write referenced a row that does not exist
    pub fn is_foreign_key_violation(&self) -> bool {
        self.sqlite_code().as_deref() == Some(SQLITE_CONSTRAINT_FOREIGNKEY)
    }

    fn sqlite_code(&self) -> Option<String> {
        match self {
            StorageError::Sqlx(sqlx::Error::Database(db_err)) => {
                db_err.code().map(|code| code.into_owned())
            }
            _ => None,
        }
    }
}

/// Where the database lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatabaseLocation {
    File(PathBuf),
    /// Private in-memory database, gone when the pool is dropped
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub location: DatabaseLocation,
    pub enable_wal: bool,
    pub max_connections: u32,
    pub busy_timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            location: DatabaseLocation::File(tagkeep_core::default_database_path()),
            enable_wal: true,
            max_connections: 10,
            busy_timeout_seconds: 30,
        }
    }
}

impl StorageConfig {
    /// Configuration for a database file at `path`, other settings default
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DatabaseLocation::File(path.into()),
            ..Self::default()
        }
    }

    /// Configuration for a throwaway in-memory database
    pub fn in_memory() -> Self {
        Self {
            location: DatabaseLocation::Memory,
            enable_wal: false,
            max_connections: 1,
            ..Self::default()
        }
    }
}

/// Open a connection pool for `config` and bring the schema up to date
pub async fn connect(config: &StorageConfig) -> StorageResult<SqlitePool> {
    if config.max_connections == 0 {
        return Err(StorageError::InvalidConfig("max_connections must be at least 1".to_string()));
    }

    let busy_timeout = Duration::from_secs(config.busy_timeout_seconds);

    let (options, pool_options) = match &config.location {
        DatabaseLocation::File(path) => {
            // Ensure parent directory exists
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            debug!("Opening database at: {}", path.display());

            let journal_mode = if config.enable_wal {
                SqliteJournalMode::Wal
            } else {
                SqliteJournalMode::Delete
            };

            let options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(journal_mode);

            let pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);

            (options, pool_options)
        }
        DatabaseLocation::Memory => {
            debug!("Opening in-memory database");

            // A single connection that never expires, otherwise the data goes with it
            let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
            let pool_options = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);

            (options, pool_options)
        }
    };

    let options = options
        .foreign_keys(true)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(busy_timeout);

    let pool = pool_options
        .acquire_timeout(busy_timeout)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;

    Ok(pool)
}

/// Run pending migrations. Safe to call repeatedly.
pub async fn migrate(pool: &SqlitePool) -> StorageResult<()> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations are up to date");
    Ok(())
}
