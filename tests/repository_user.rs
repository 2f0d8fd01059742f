use linkvault::domain::entities::{NewUser, ProfileUpdate};
use linkvault::domain::repositories::UserRepository;
use linkvault::error::AppError;
use linkvault::infrastructure::persistence::PgUserRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_create_and_find_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo
        .create(new_user("alice", "alice@example.com"))
        .await
        .unwrap();

    assert!(user.id > 0);
    assert!(user.api_key.is_none());

    assert_eq!(repo.find_by_id(user.id).await.unwrap(), Some(user.clone()));
    assert_eq!(
        repo.find_by_email("alice@example.com").await.unwrap(),
        Some(user.clone())
    );
    assert_eq!(repo.find_by_username("alice").await.unwrap(), Some(user));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_duplicate_email_and_username(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(new_user("alice", "alice@example.com"))
        .await
        .unwrap();

    let by_email = repo
        .create(new_user("alice2", "alice@example.com"))
        .await
        .unwrap_err();
    let by_username = repo
        .create(new_user("alice", "other@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(by_email, AppError::Conflict { .. }));
    assert!(matches!(by_username, AppError::Conflict { .. }));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_update_profile_merges_fields(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let user = repo
        .create(new_user("bob", "bob@example.com"))
        .await
        .unwrap();

    let updated = repo
        .update_profile(
            user.id,
            ProfileUpdate {
                username: None,
                email: Some("bob@new.example".to_string()),
            },
        )
        .await
        .unwrap();
    assert!(updated);

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.username, "bob");
    assert_eq!(stored.email, "bob@new.example");
    assert_eq!(stored.password_hash, user.password_hash);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_update_missing_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let update = ProfileUpdate {
        username: Some("ghost".to_string()),
        email: None,
    };

    assert!(!repo.update_profile(999, update).await.unwrap());
    assert!(!repo.set_api_key(999, "k").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_update_to_taken_email_is_conflict(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(new_user("carol", "carol@example.com"))
        .await
        .unwrap();
    let dave = repo
        .create(new_user("dave", "dave@example.com"))
        .await
        .unwrap();

    let err = repo
        .update_profile(
            dave.id,
            ProfileUpdate {
                username: None,
                email: Some("carol@example.com".to_string()),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_set_api_key_replaces(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let user = repo
        .create(new_user("erin", "erin@example.com"))
        .await
        .unwrap();

    assert!(repo.set_api_key(user.id, "first").await.unwrap());
    assert!(repo.set_api_key(user.id, "second").await.unwrap());

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.api_key.as_deref(), Some("second"));
}
