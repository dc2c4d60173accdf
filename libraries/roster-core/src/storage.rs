//! Storage trait for user persistence

use crate::error::Result;
use crate::types::{NewUser, User, UserId};
use async_trait::async_trait;

/// Persistence gateway for user records
///
/// Handlers depend on this trait rather than on a concrete database so the
/// store can be constructed once at startup and injected into the router.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user and return it with its generated ID and timestamps
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Look up a user by primary key
    ///
    /// # Errors
    /// Returns `RosterError::UserNotFound` when no live row has this ID
    async fn find_user(&self, id: UserId) -> Result<User>;
}
