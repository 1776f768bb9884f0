//! Repository for the `categories` table.

use crate::models::category::{Category, CreateCategory};
use crate::DbPool;

const COLUMNS: &str = "id, name, description, created_at";

pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a category, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateCategory) -> Result<Category, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let query = format!(
            "INSERT INTO categories (name, description, created_at)
             VALUES (?1, ?2, ?3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(chrono::Utc::now())
            .fetch_one(executor)
            .await
    }

    /// List all categories ordered by name.
    pub async fn list(pool: &DbPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }
}
