//! Repository for the `agents` table.

use complaintbot_core::types::DbId;

use crate::models::agent::{Agent, CreateAgent};
use crate::DbPool;

const COLUMNS: &str =
    "id, user_id, specialization, max_tickets, current_tickets, is_available, created_at";

pub struct AgentRepo;

impl AgentRepo {
    /// Insert an agent with `current_tickets = 0`, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateAgent) -> Result<Agent, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let query = format!(
            "INSERT INTO agents (user_id, specialization, max_tickets, current_tickets, is_available, created_at)
             VALUES (?1, ?2, ?3, 0, ?4, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agent>(&query)
            .bind(input.user_id)
            .bind(&input.specialization)
            .bind(input.max_tickets)
            .bind(input.is_available)
            .bind(chrono::Utc::now())
            .fetch_one(executor)
            .await
    }

    /// Find an agent by ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Agent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agents WHERE id = ?1");
        sqlx::query_as::<_, Agent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
