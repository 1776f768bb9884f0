use complaintbot_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `notifications` table (in-app channel).
#[derive(Debug, Clone, FromRow)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub ticket_id: Option<String>,
    pub channel: String,
    pub subject: String,
    pub body: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub ticket_id: Option<String>,
    pub channel: String,
    pub subject: String,
    pub body: String,
}
