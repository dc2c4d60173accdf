//! User record queries

use crate::error::{Result, StorageError};
use chrono::{DateTime, Utc};
use roster_core::{NewUser, User, UserId};
use sqlx::{FromRow, SqlitePool};

/// Raw `users` row as stored in `SQLite`
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    created_at: i64,
    updated_at: i64,
    deleted_at: Option<i64>,
}

impl TryFrom<UserRow> for User {
    type Error = StorageError;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(User {
            id: UserId::new(row.id),
            created_at: from_millis("created_at", row.created_at)?,
            updated_at: from_millis("updated_at", row.updated_at)?,
            deleted_at: row
                .deleted_at
                .map(|ms| from_millis("deleted_at", ms))
                .transpose()?,
            name: row.name,
            email: row.email,
        })
    }
}

fn from_millis(column: &'static str, value: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value).ok_or(StorageError::InvalidTimestamp { column, value })
}

/// Insert a new user
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `user` - Validated create payload
///
/// # Returns
///
/// The persisted user with its generated ID. `created_at` and `updated_at`
/// are identical and carry millisecond precision, exactly as a later lookup
/// will return them.
pub async fn create(pool: &SqlitePool, user: NewUser) -> Result<User> {
    let now = Utc::now().timestamp_millis();

    let result = sqlx::query(
        "INSERT INTO users (name, email, created_at, updated_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(user_id = id, "Created user");

    User::try_from(UserRow {
        id,
        name: user.name,
        email: user.email,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    })
}

/// Get a user by ID
///
/// Soft-deleted rows are treated as absent.
pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, email, created_at, updated_at, deleted_at
         FROM users WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(id.get())
    .fetch_optional(pool)
    .await?;

    row.map(User::try_from).transpose()
}
