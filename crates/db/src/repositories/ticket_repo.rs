//! Repository for the `tickets` table.

use complaintbot_core::status::TicketStatus;
use complaintbot_core::types::{DbId, Timestamp};

use crate::models::ticket::{CreateTicket, StatusChange, Ticket};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, user_id, category, category_id, priority, \
                        status, assigned_to, created_at, updated_at, resolved_at";

/// Provides ticket lookups and the transactional status transition.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a ticket, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateTicket) -> Result<Ticket, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let now = chrono::Utc::now();
        let query = format!(
            "INSERT INTO tickets (id, title, description, user_id, category, category_id,
                                  priority, status, assigned_to, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(&input.id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.user_id)
            .bind(&input.category)
            .bind(input.category_id)
            .bind(input.priority.as_str())
            .bind(input.status.as_str())
            .bind(input.assigned_to)
            .bind(now)
            .fetch_one(executor)
            .await
    }

    /// Find a ticket by its `TCK-` identifier.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = ?1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The oldest ticket in the system, if any.
    pub async fn first(pool: &DbPool) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets ORDER BY created_at ASC, id ASC LIMIT 1");
        sqlx::query_as::<_, Ticket>(&query)
            .fetch_optional(pool)
            .await
    }

    /// The oldest ticket owned by `user_id`, if any.
    pub async fn first_for_user(
        pool: &DbPool,
        user_id: DbId,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tickets WHERE user_id = ?1 \
             ORDER BY created_at ASC, id ASC LIMIT 1"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of tickets.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tickets")
            .fetch_one(pool)
            .await
    }

    /// Set a ticket's status and `updated_at` in one transaction.
    ///
    /// `resolved_at` is also stamped when the new status is `resolved`; it is
    /// left as-is for every other status. Returns `None` if the ticket does
    /// not exist. Any failure rolls the transaction back, leaving the row
    /// untouched.
    pub async fn transition_status(
        pool: &DbPool,
        id: &str,
        status: TicketStatus,
        at: Timestamp,
    ) -> Result<Option<StatusChange>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<String> =
            sqlx::query_scalar("SELECT status FROM tickets WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(previous) = previous else {
            tx.rollback().await?;
            return Ok(None);
        };

        let query = format!(
            "UPDATE tickets SET
                status = ?2,
                updated_at = ?3,
                resolved_at = CASE WHEN ?2 = 'resolved' THEN ?3 ELSE resolved_at END
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(at)
            .fetch_one(&mut *tx)
            .await;

        let ticket = match updated {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::error!(ticket_id = id, error = %e, "Status update failed, rolling back");
                tx.rollback().await?;
                return Err(e);
            }
        };

        tx.commit().await?;
        Ok(Some(StatusChange { previous, ticket }))
    }
}
