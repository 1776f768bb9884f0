//! Schema introspection and the ad-hoc column migration.
//!
//! Table and column names cannot be bound as parameters, so callers pass
//! `&'static str` identifiers only.

use crate::DbPool;

/// Outcome of [`SchemaRepo::add_integer_column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMigration {
    Added,
    AlreadyPresent,
}

pub struct SchemaRepo;

impl SchemaRepo {
    /// Whether `table` has a column named `column`, per `pragma_table_info`.
    pub async fn column_exists(
        pool: &DbPool,
        table: &'static str,
        column: &'static str,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2")
                .bind(table)
                .bind(column)
                .fetch_one(pool)
                .await?;
        Ok(count > 0)
    }

    /// Add `column INTEGER DEFAULT <default>` to `table` unless it exists.
    ///
    /// The check and the `ALTER TABLE` run in one transaction, so re-running
    /// never errors and never duplicates the column.
    pub async fn add_integer_column(
        pool: &DbPool,
        table: &'static str,
        column: &'static str,
        default: i64,
    ) -> Result<ColumnMigration, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2")
                .bind(table)
                .bind(column)
                .fetch_one(&mut *tx)
                .await?;

        if count > 0 {
            tx.rollback().await?;
            return Ok(ColumnMigration::AlreadyPresent);
        }

        let ddl = format!("ALTER TABLE {table} ADD COLUMN {column} INTEGER DEFAULT {default}");
        sqlx::query(&ddl).execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(table, column, "Column added");
        Ok(ColumnMigration::Added)
    }
}
