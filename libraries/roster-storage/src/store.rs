use crate::{create_pool, error::StorageError, run_migrations, users};
use async_trait::async_trait;
use roster_core::{error::Result, NewUser, RosterError, User, UserId, UserStore};
use sqlx::SqlitePool;

/// `UserStore` backed by an `SQLite` pool
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Wrap a pool whose schema is already migrated
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database and bring its schema up to date
    pub async fn connect(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        Ok(users::create(&self.pool, user).await?)
    }

    async fn find_user(&self, id: UserId) -> Result<User> {
        users::get_by_id(&self.pool, id)
            .await?
            .ok_or(RosterError::UserNotFound(id))
    }
}
