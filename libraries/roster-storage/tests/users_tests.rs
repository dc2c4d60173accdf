//! Integration tests for user persistence


use roster_core::{NewUser, RosterError, UserId, UserStore};
use roster_storage::{create_pool, run_migrations, users, SqliteUserStore, StorageError};
use std::collections::HashSet;
use test_helpers::{count_users, TestDb};

#[tokio::test]
async fn test_create_and_retrieve_user() {
    let db = TestDb::new().await;

    let created = db
        .store
        .create_user(NewUser::new("Test DB User", "testdbuser@example.com"))
        .await
        .expect("Failed to create user");

    let retrieved = db
        .store
        .find_user(created.id)
        .await
        .expect("Failed to find user");

    assert_eq!(retrieved.name, "Test DB User");
    assert_eq!(retrieved.email, "testdbuser@example.com");
    assert_eq!(retrieved, created);
}

#[tokio::test]
async fn test_create_populates_generated_fields() {
    let db = TestDb::new().await;

    let user = db
        .store
        .create_user(NewUser::new("Alice", "alice@example.com"))
        .await
        .unwrap();

    assert!(user.id.get() > 0);
    assert_eq!(user.created_at, user.updated_at);
    assert!(user.deleted_at.is_none());
}

#[tokio::test]
async fn test_ids_are_positive_and_never_reused() {
    let db = TestDb::new().await;

    let mut seen = HashSet::new();
    let mut last = 0;
    for i in 0..10 {
        let user = db
            .store
            .create_user(NewUser::new(format!("User {i}"), "same@example.com"))
            .await
            .unwrap();

        assert!(user.id.get() > last, "IDs should increase monotonically");
        assert!(seen.insert(user.id), "ID {} was handed out twice", user.id);
        last = user.id.get();
    }

    assert_eq!(count_users(db.pool()).await, 10);
}

#[tokio::test]
async fn test_duplicate_emails_are_accepted() {
    let db = TestDb::new().await;

    let first = db
        .store
        .create_user(NewUser::new("One", "dup@example.com"))
        .await
        .unwrap();
    let second = db
        .store
        .create_user(NewUser::new("Two", "dup@example.com"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_empty_fields_are_persisted() {
    let db = TestDb::new().await;

    let user = db.store.create_user(NewUser::new("", "")).await.unwrap();
    let found = db.store.find_user(user.id).await.unwrap();

    assert_eq!(found.name, "");
    assert_eq!(found.email, "");
}

#[tokio::test]
async fn test_get_nonexistent_user() {
    let db = TestDb::new().await;

    let row = users::get_by_id(db.pool(), UserId::new(12345)).await.unwrap();
    assert!(row.is_none());

    let result = db.store.find_user(UserId::new(12345)).await;
    assert!(matches!(result, Err(RosterError::UserNotFound(id)) if id == UserId::new(12345)));
}

#[tokio::test]
async fn test_soft_deleted_user_is_not_found() {
    let db = TestDb::new().await;

    let user = db
        .store
        .create_user(NewUser::new("Gone", "gone@example.com"))
        .await
        .unwrap();

    sqlx::query("UPDATE users SET deleted_at = updated_at WHERE id = ?")
        .bind(user.id.get())
        .execute(db.pool())
        .await
        .unwrap();

    let result = db.store.find_user(user.id).await;
    assert!(matches!(result, Err(RosterError::UserNotFound(_))));
    assert_eq!(count_users(db.pool()).await, 1);
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let db = TestDb::new().await;

    db.store
        .create_user(NewUser::new("Kept", "kept@example.com"))
        .await
        .unwrap();

    run_migrations(db.pool()).await.expect("Second run should succeed");
    run_migrations(db.pool()).await.expect("Third run should succeed");

    assert_eq!(count_users(db.pool()).await, 1);
}

#[tokio::test]
async fn test_in_memory_database_is_shared_across_calls() {
    let store = SqliteUserStore::connect("sqlite::memory:").await.unwrap();

    let user = store
        .create_user(NewUser::new("Memo", "memo@example.com"))
        .await
        .unwrap();
    let found = store.find_user(user.id).await.unwrap();

    assert_eq!(found.name, "Memo");
}

#[tokio::test]
async fn test_connect_failure_is_returned() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_url = format!(
        "sqlite://{}",
        temp_dir.path().join("missing").join("dir").join("test.db").display()
    );

    let result = create_pool(&db_url).await;
    assert!(matches!(result, Err(StorageError::Connection(_))));

    let result = SqliteUserStore::connect(&db_url).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_invalid_url_is_connection_error() {
    let result = create_pool("postgres://localhost/roster").await;
    assert!(matches!(result, Err(StorageError::Connection(_))));
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let db = TestDb::new().await;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = db.store.clone();
            tokio::spawn(async move {
                store
                    .create_user(NewUser::new(format!("Worker {i}"), "w@example.com"))
                    .await
                    .unwrap()
                    .id
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }

    assert_eq!(ids.len(), 8);
    assert_eq!(count_users(db.pool()).await, 8);
}
