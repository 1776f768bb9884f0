mod common;

use assert_matches::assert_matches;
use complaintbot_db::repositories::UserRepo;

#[tokio::test]
async fn test_duplicate_email_violates_unique_constraint() {
    let pool = common::test_pool().await;
    common::insert_user(&pool, "admin@example.com", "admin").await;

    let dup = UserRepo::create(
        &pool,
        &complaintbot_db::models::user::CreateUser {
            full_name: "Other".into(),
            email: "admin@example.com".into(),
            password_hash: "x".into(),
            role: "user".into(),
        },
    )
    .await;
    assert_matches!(dup, Err(sqlx::Error::Database(_)));
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_role_rejected() {
    let pool = common::test_pool().await;
    let result = UserRepo::create(
        &pool,
        &complaintbot_db::models::user::CreateUser {
            full_name: "Agent".into(),
            email: "agent@example.com".into(),
            password_hash: "x".into(),
            role: "agent".into(),
        },
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_update_password_and_lookup() {
    let pool = common::test_pool().await;
    let admin = common::insert_user(&pool, "admin@example.com", "admin").await;

    let updated = UserRepo::update_password(&pool, admin.id, "new-hash")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.password_hash, "new-hash");
    assert!(updated.is_admin());

    let found = UserRepo::find_by_email(&pool, "admin@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, admin.id);
    assert!(UserRepo::update_password(&pool, 999, "x").await.unwrap().is_none());
    assert_eq!(UserRepo::list(&pool).await.unwrap().len(), 1);
}
