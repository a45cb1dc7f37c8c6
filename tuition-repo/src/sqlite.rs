//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use tuition_types::{
    Month, Payment, PaymentId, PaymentKey, PaymentLookup, PaymentRepository, RepoError,
};

use crate::types::{PAYMENT_COLUMNS, SqlitePaymentRow, map_read_error, map_write_error};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let ddl = include_str!("../migrations/0001_create_payments.sql");
    for statement in ddl.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration 0001 failed: {}", e))?;
        }
    }
    Ok(())
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:");

        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if !in_memory {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to `:memory:` is a separate database, so pin the
        // pool to one long-lived connection.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;
        run_migrations(&pool).await?;

        Ok(Self { pool })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentLookup for SqliteRepo {
    async fn payment_exists(&self, key: &PaymentKey) -> Result<bool, RepoError> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM payments
               WHERE student_id = ? AND tuition_id = ? AND year = ? AND month = ?"#,
        )
        .bind(&key.student_id)
        .bind(&key.tuition_id)
        .bind(key.period.year)
        .bind(key.period.month.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_read_error)?;

        Ok(count > 0)
    }
}

#[async_trait]
impl PaymentRepository for SqliteRepo {
    async fn insert_payment(&self, payment: &Payment) -> Result<Payment, RepoError> {
        sqlx::query(
            r#"INSERT INTO payments (id, student_id, tuition_id, year, month, amount, paid_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(payment.id.to_string())
        .bind(&payment.student_id)
        .bind(&payment.tuition_id)
        .bind(payment.year)
        .bind(payment.month.as_str())
        .bind(payment.amount)
        .bind(payment.paid_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(payment.clone())
    }

    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<SqlitePaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE id = ?",
            PAYMENT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error)?;

        row.map(SqlitePaymentRow::into_domain).transpose()
    }

    async fn find_student_ids_by_tuition_and_month(
        &self,
        tuition_id: &str,
        year: i32,
        month: Month,
    ) -> Result<Vec<String>, RepoError> {
        sqlx::query_scalar(
            r#"SELECT DISTINCT student_id FROM payments
               WHERE tuition_id = ? AND year = ? AND month = ?
               ORDER BY student_id"#,
        )
        .bind(tuition_id)
        .bind(year)
        .bind(month.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_read_error)
    }

    async fn delete_all_by_tuition_id(&self, tuition_id: &str) -> Result<u64, RepoError> {
        let result = sqlx::query(r#"DELETE FROM payments WHERE tuition_id = ?"#)
            .bind(tuition_id)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_all_by_student_id(&self, student_id: &str) -> Result<u64, RepoError> {
        let result = sqlx::query(r#"DELETE FROM payments WHERE student_id = ?"#)
            .bind(student_id)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(result.rows_affected())
    }
}
