//! Repository for the `notifications` table.

use complaintbot_core::types::DbId;

use crate::models::notification::{CreateNotification, Notification};
use crate::DbPool;

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, user_id, ticket_id, channel, subject, body, created_at";

/// Provides insert and lookup for in-app notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Store a notification, returning the generated ID.
    pub async fn create(pool: &DbPool, input: &CreateNotification) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications (user_id, ticket_id, channel, subject, body, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(&input.ticket_id)
        .bind(&input.channel)
        .bind(&input.subject)
        .bind(&input.body)
        .bind(chrono::Utc::now())
        .fetch_one(pool)
        .await
    }

    /// List a user's notifications, newest first.
    pub async fn list_for_user(
        pool: &DbPool,
        user_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = ?1 \
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
