//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Response, Router};
use roster_core::{NewUser, RosterError, User, UserId, UserStore};
use roster_server::{create_router, ApiSettings, AppState};
use roster_storage::SqliteUserStore;
use std::sync::Arc;
use tempfile::TempDir;

/// Test app backed by a file-based SQLite database in a temp directory
pub struct TestApp {
    pub router: Router,
    pub store: SqliteUserStore,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_api(ApiSettings::default()).await
    }

    pub async fn with_api(api: ApiSettings) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let store = SqliteUserStore::connect(&db_url).await.unwrap();
        let app_state = AppState::new(Arc::new(store.clone()), api);

        Self {
            router: create_router(app_state),
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Count every row in the users table
    pub async fn user_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.store.pool())
            .await
            .unwrap()
    }
}

/// Router over a store whose every operation fails
pub fn failing_app(api: ApiSettings) -> Router {
    create_router(AppState::new(Arc::new(FailingStore), api))
}

/// Store that rejects every call, standing in for an unavailable database
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn create_user(&self, _user: NewUser) -> roster_core::Result<User> {
        Err(RosterError::Database("disk I/O error".to_string()))
    }

    async fn find_user(&self, _id: UserId) -> roster_core::Result<User> {
        Err(RosterError::Database("disk I/O error".to_string()))
    }
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

/// Test user fixtures
pub mod fixtures {
    pub const TEST_NAME: &str = "Test User";
    pub const TEST_EMAIL: &str = "testuser@example.com";
}
