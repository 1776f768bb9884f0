//! Agent entity model.

use complaintbot_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `agents` table: a user plus support-capacity metadata.
///
/// `max_tickets` / `current_tickets` are recorded but not enforced.
#[derive(Debug, Clone, FromRow)]
pub struct Agent {
    pub id: DbId,
    pub user_id: DbId,
    pub specialization: Option<String>,
    pub max_tickets: i64,
    pub current_tickets: i64,
    pub is_available: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateAgent {
    pub user_id: DbId,
    pub specialization: Option<String>,
    pub max_tickets: i64,
    pub is_available: bool,
}
