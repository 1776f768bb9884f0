//! Ticket entity model and DTOs.

use complaintbot_core::status::{TicketPriority, TicketStatus};
use complaintbot_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `tickets` table.
///
/// `status` and `priority` are kept as stored text; the table's check
/// constraints limit them to the [`TicketStatus`] and [`TicketPriority`]
/// spellings.
#[derive(Debug, Clone, FromRow)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub user_id: DbId,
    pub category: Option<String>,
    pub category_id: Option<DbId>,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

/// DTO for inserting a ticket. The caller supplies the `TCK-` identifier.
#[derive(Debug, Clone)]
pub struct CreateTicket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub user_id: DbId,
    pub category: Option<String>,
    pub category_id: Option<DbId>,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub assigned_to: Option<DbId>,
}

/// Result of a committed status transition.
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// Status stored before the update.
    pub previous: String,
    /// The ticket row after the update.
    pub ticket: Ticket,
}
