//! Tests for user repository against a mocked connection.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use super::*;

fn user(email: &str) -> users::Model {
    let now: DateTime<FixedOffset> = Utc::now().into();
    users::Model {
        id: Uuid::new_v4(),
        name: "Ada".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$test_hash".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_create_returns_user() {
    let stored = user("ada@example.com");
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()]])
            .into_connection(),
    );

    let created = UserRepository::new(db)
        .create("Ada", "ada@example.com", "$argon2id$test_hash")
        .await
        .unwrap();

    assert_eq!(created, stored);
}

#[tokio::test]
async fn test_find_by_email() {
    let stored = user("ada@example.com");
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()]])
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection(),
    );
    let repo = UserRepository::new(db);

    let found = repo.find_by_email("ada@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(stored.id));

    let missing = repo.find_by_email("nobody@example.com").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_email_exists() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(1)),
            )])]])
            .into_connection(),
    );

    assert!(
        UserRepository::new(db)
            .email_exists("ada@example.com")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_delete_reports_whether_user_existed() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection(),
    );
    let repo = UserRepository::new(db);

    assert!(repo.delete(Uuid::new_v4()).await.unwrap());
    assert!(!repo.delete(Uuid::new_v4()).await.unwrap());
}
