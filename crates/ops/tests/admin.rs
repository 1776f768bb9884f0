mod common;

use assert_matches::assert_matches;
use complaintbot_core::error::CoreError;
use complaintbot_db::repositories::UserRepo;
use complaintbot_ops::admin::{self, CreateAdminOutcome, NewAdmin, PasswordReset};
use complaintbot_ops::password;
use complaintbot_ops::OpsError;

fn new_admin(email: &str) -> NewAdmin {
    NewAdmin {
        full_name: "Admin User".into(),
        email: email.into(),
        password: "admin123!".into(),
    }
}

#[tokio::test]
async fn test_create_admin_twice_reports_existing() {
    let pool = common::test_pool().await;

    let first = admin::create_admin(&pool, &new_admin("admin@example.com"))
        .await
        .unwrap();
    let user = assert_matches!(first, CreateAdminOutcome::Created(user) => user);
    assert!(user.is_admin());
    assert!(password::verify_password("admin123!", &user.password_hash).unwrap());
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);

    let second = admin::create_admin(&pool, &new_admin("admin@example.com"))
        .await
        .unwrap();
    assert_matches!(second, CreateAdminOutcome::AlreadyExists);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_admin_rejects_invalid_input() {
    let pool = common::test_pool().await;

    let result = admin::create_admin(&pool, &new_admin("not-an-email")).await;
    assert_matches!(result, Err(OpsError::Core(CoreError::Validation(_))));
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_reset_admin_password() {
    let pool = common::test_pool().await;
    admin::create_admin(&pool, &new_admin("admin@example.com"))
        .await
        .unwrap();

    let reset = admin::reset_admin_password(&pool, "admin@example.com", "new-secret-1")
        .await
        .unwrap();
    let user = assert_matches!(reset, PasswordReset::Reset(user) => user);
    assert!(password::verify_password("new-secret-1", &user.password_hash).unwrap());
    assert!(!password::verify_password("admin123!", &user.password_hash).unwrap());
}

#[tokio::test]
async fn test_reset_refuses_non_admin_and_unknown() {
    let pool = common::test_pool().await;
    let customer =
        common::insert_user(&pool, "Customer One", "customer1@example.com", "user").await;

    let reset = admin::reset_admin_password(&pool, "customer1@example.com", "new-secret-1")
        .await
        .unwrap();
    assert_matches!(reset, PasswordReset::NotAdmin { role } if role == "user");
    let unchanged = UserRepo::find_by_id(&pool, customer.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.password_hash, customer.password_hash);

    let missing = admin::reset_admin_password(&pool, "ghost@example.com", "new-secret-1").await;
    assert_matches!(missing, Err(OpsError::Core(CoreError::NotFound { .. })));
}

#[tokio::test]
async fn test_list_users_in_insert_order() {
    let pool = common::test_pool().await;
    common::insert_user(&pool, "Admin User", "admin@example.com", "admin").await;
    common::insert_user(&pool, "Customer One", "customer1@example.com", "user").await;

    let users = admin::list_users(&pool).await.unwrap();
    let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, ["admin@example.com", "customer1@example.com"]);

    let table = admin::format_user_table(&users);
    assert!(table.starts_with("Total users: 2\n"));
}

#[tokio::test]
async fn test_reset_fails_when_stored_hash_does_not_verify() {
    let pool = common::test_pool().await;
    admin::create_admin(&pool, &new_admin("admin@example.com"))
        .await
        .unwrap();
    sqlx::query(
        "CREATE TRIGGER overwrite_hash AFTER UPDATE OF password_hash ON users
         BEGIN UPDATE users SET password_hash = 'overwritten' WHERE id = NEW.id; END",
    )
    .execute(&pool)
    .await
    .unwrap();

    let reset = admin::reset_admin_password(&pool, "admin@example.com", "new-secret-1").await;
    assert_matches!(reset, Err(OpsError::Password(_)));
}
