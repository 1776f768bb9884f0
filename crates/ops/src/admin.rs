//! Administrative user utilities: create, reset, list, verify.
//!
//! Each operation is a single query or mutation against `users`; they do
//! not compose with each other.

use complaintbot_core::roles::ROLE_ADMIN;
use complaintbot_db::models::user::{CreateUser, User};
use complaintbot_db::repositories::UserRepo;
use complaintbot_db::DbPool;
use validator::Validate;

use crate::error::{OpsError, OpsResult};
use crate::password::{self, MIN_PASSWORD_LENGTH};

/// Emails checked by `verify-admin` when none are given.
pub const DEFAULT_ADMIN_EMAILS: [&str; 2] = ["admin@example.com", "admin@complaintbot.ai"];

/// Input for [`create_admin`].
#[derive(Debug, Clone, Validate)]
pub struct NewAdmin {
    #[validate(length(min = 1, message = "full name must not be empty"))]
    pub full_name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    pub password: String,
}

impl NewAdmin {
    fn check(&self) -> OpsResult<()> {
        self.validate()
            .map_err(|e| OpsError::validation(e.to_string()))?;
        password::validate_password_strength(&self.password, MIN_PASSWORD_LENGTH)
            .map_err(OpsError::validation)
    }
}

#[derive(Debug)]
pub enum CreateAdminOutcome {
    Created(User),
    /// A user with this email exists; nothing was inserted.
    AlreadyExists,
}

/// Create an admin user unless the email is already taken.
pub async fn create_admin(pool: &DbPool, input: &NewAdmin) -> OpsResult<CreateAdminOutcome> {
    input.check()?;

    if UserRepo::find_by_email(pool, &input.email).await?.is_some() {
        tracing::info!(email = %input.email, "User already exists, skipping insert");
        return Ok(CreateAdminOutcome::AlreadyExists);
    }

    let user = UserRepo::create(
        pool,
        &CreateUser {
            full_name: input.full_name.clone(),
            email: input.email.clone(),
            password_hash: password::hash_password(&input.password)?,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Admin user created");
    Ok(CreateAdminOutcome::Created(user))
}

#[derive(Debug)]
pub enum PasswordReset {
    Reset(User),
    /// The user exists but is not an admin; the hash was left unchanged.
    NotAdmin { role: String },
}

/// Regenerate the password hash of an existing admin.
///
/// The stored row is read back and must verify against `new_password`;
/// a mismatch is reported as [`OpsError::Password`].
pub async fn reset_admin_password(
    pool: &DbPool,
    email: &str,
    new_password: &str,
) -> OpsResult<PasswordReset> {
    password::validate_password_strength(new_password, MIN_PASSWORD_LENGTH)
        .map_err(OpsError::validation)?;

    let user = UserRepo::find_by_email(pool, email)
        .await?
        .ok_or_else(|| OpsError::not_found("user", email))?;

    if !user.is_admin() {
        return Ok(PasswordReset::NotAdmin { role: user.role });
    }

    let hash = password::hash_password(new_password)?;
    UserRepo::update_password(pool, user.id, &hash)
        .await?
        .ok_or_else(|| OpsError::not_found("user", email))?;

    let updated = UserRepo::find_by_id(pool, user.id)
        .await?
        .ok_or_else(|| OpsError::not_found("user", email))?;
    if !password::verify_password(new_password, &updated.password_hash)? {
        tracing::error!(user_id = updated.id, "Stored hash does not match the new password");
        return Err(OpsError::Password(
            "stored hash does not verify against the new password".into(),
        ));
    }

    tracing::info!(user_id = updated.id, "Admin password reset");
    Ok(PasswordReset::Reset(updated))
}

/// All users, oldest first.
pub async fn list_users(pool: &DbPool) -> OpsResult<Vec<User>> {
    Ok(UserRepo::list(pool).await?)
}

/// Read back a user by email.
pub async fn find_user(pool: &DbPool, email: &str) -> OpsResult<Option<User>> {
    Ok(UserRepo::find_by_email(pool, email).await?)
}

/// Render users as the fixed-width table printed by `list-users`.
pub fn format_user_table(users: &[User]) -> String {
    let rule = "-".repeat(80);
    let mut out = format!("Total users: {}\n\nUser List:\n{rule}\n", users.len());
    out.push_str(&format!(
        "{:<5} {:<20} {:<30} {:<10}\n",
        "ID", "Full Name", "Email", "Role"
    ));
    out.push_str(&rule);
    out.push('\n');
    for user in users {
        out.push_str(&format!(
            "{:<5} {:<20} {:<30} {:<10}\n",
            user.id, user.full_name, user.email, user.role
        ));
    }
    out
}

/// Render the read-back report for one email lookup.
pub fn describe_lookup(email: &str, user: Option<&User>) -> String {
    match user {
        None => format!("User {email} exists: false\n"),
        Some(user) => format!(
            "User {email} exists: true\n\
             Email: {}\n\
             Full Name: {}\n\
             Role: {}\n\
             Password hash: {}\n",
            user.email,
            user.full_name,
            user.role,
            password::preview(&user.password_hash, 20),
        ),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn user(id: i64, name: &str, email: &str, role: &str) -> User {
        User {
            id,
            full_name: name.into(),
            email: email.into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abcdefgh".into(),
            role: role.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn table_has_header_and_rows() {
        let table = format_user_table(&[
            user(1, "Admin User", "admin@example.com", "admin"),
            user(2, "Customer One", "customer1@example.com", "user"),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Total users: 2");
        assert!(lines[4].starts_with("ID    Full Name"));
        assert!(lines[6].starts_with("1     Admin User           admin@example.com"));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn lookup_report_truncates_hash() {
        let admin = user(1, "Admin User", "admin@example.com", "admin");
        let report = describe_lookup("admin@example.com", Some(&admin));
        assert!(report.contains("exists: true"));
        assert!(report.contains("Role: admin"));
        assert!(report.contains("Password hash: $argon2id$v=19$m=194..."));

        assert_eq!(
            describe_lookup("ghost@example.com", None),
            "User ghost@example.com exists: false\n"
        );
    }

    #[test]
    fn new_admin_validation() {
        let ok = NewAdmin {
            full_name: "Admin".into(),
            email: "admin@example.com".into(),
            password: "long-enough".into(),
        };
        assert!(ok.check().is_ok());

        let bad_email = NewAdmin {
            email: "nope".into(),
            ..ok.clone()
        };
        assert!(bad_email.check().is_err());

        let short = NewAdmin {
            password: "short".into(),
            ..ok
        };
        assert!(short.check().is_err());
    }
}
