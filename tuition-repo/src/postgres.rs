//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use tuition_types::{
    Month, Payment, PaymentId, PaymentKey, PaymentLookup, PaymentRepository, RepoError,
};

use crate::types::{PAYMENT_COLUMNS, PgPaymentRow, map_read_error, map_write_error};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository.
///
/// Duplicate payments are rejected by the `uq_payments_student_tuition_period`
/// constraint, so concurrent inserts for the same key cannot both commit.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_payments_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentLookup for PostgresRepo {
    async fn payment_exists(&self, key: &PaymentKey) -> Result<bool, RepoError> {
        sqlx::query_scalar(
            r#"SELECT EXISTS (
                   SELECT 1 FROM payments
                   WHERE student_id = $1 AND tuition_id = $2 AND year = $3 AND month = $4
               )"#,
        )
        .bind(&key.student_id)
        .bind(&key.tuition_id)
        .bind(key.period.year)
        .bind(key.period.month.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_read_error)
    }
}

#[async_trait]
impl PaymentRepository for PostgresRepo {
    async fn insert_payment(&self, payment: &Payment) -> Result<Payment, RepoError> {
        let row: PgPaymentRow = sqlx::query_as(&format!(
            r#"INSERT INTO payments (id, student_id, tuition_id, year, month, amount, paid_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {}"#,
            PAYMENT_COLUMNS
        ))
        .bind(payment.id.into_uuid())
        .bind(&payment.student_id)
        .bind(&payment.tuition_id)
        .bind(payment.year)
        .bind(payment.month.as_str())
        .bind(payment.amount)
        .bind(payment.paid_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.into_domain()
    }

    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<PgPaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments WHERE id = $1",
            PAYMENT_COLUMNS
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error)?;

        row.map(PgPaymentRow::into_domain).transpose()
    }

    async fn find_student_ids_by_tuition_and_month(
        &self,
        tuition_id: &str,
        year: i32,
        month: Month,
    ) -> Result<Vec<String>, RepoError> {
        sqlx::query_scalar(
            r#"SELECT DISTINCT student_id FROM payments
               WHERE tuition_id = $1 AND year = $2 AND month = $3
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
        let result = sqlx::query(r#"DELETE FROM payments WHERE tuition_id = $1"#)
            .bind(tuition_id)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_all_by_student_id(&self, student_id: &str) -> Result<u64, RepoError> {
        let result = sqlx::query(r#"DELETE FROM payments WHERE student_id = $1"#)
            .bind(student_id)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(result.rows_affected())
    }
}
