//! Roster Storage
//!
//! `SQLite` persistence gateway for Roster user records.
//!
//! # Example
//!
//! ```rust,no_run
//! use roster_core::{NewUser, UserStore};
//! use roster_storage::{create_pool, run_migrations, SqliteUserStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create database connection
//! let pool = create_pool("sqlite://roster.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteUserStore::new(pool);
//! let user = store.create_user(NewUser::new("Alice", "alice@example.com")).await?;
//! let found = store.find_user(user.id).await?;
//! assert_eq!(found.name, "Alice");
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

pub mod users;

pub use error::StorageError;
pub use store::SqliteUserStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Safe to call on every startup: already-applied migrations are skipped and
/// only the schema is touched.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))?;

    tracing::debug!("Database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// The first connection is opened eagerly, so an unreachable database is
/// reported here rather than on the first request.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://roster.db>`)
///
/// # Errors
///
/// Returns `StorageError::Connection` if the URL is invalid or the database
/// cannot be opened
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true);

    let connected = if is_in_memory(database_url) {
        // Every in-memory connection is its own database, so keep exactly one
        // connection alive for the lifetime of the pool.
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
    } else {
        let options = options
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(30));

        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
    };

    connected.map_err(|e| StorageError::Connection(e.to_string()))
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://roster?mode=memory"));
        assert!(!is_in_memory("sqlite://roster.db"));
    }
}
