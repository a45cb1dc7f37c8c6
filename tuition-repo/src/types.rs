//! Database row types and error mapping shared by the adapters.

use sqlx::FromRow;

use tuition_types::{Month, Payment, PaymentId, RepoError};

#[cfg(feature = "postgres")]
use chrono::{DateTime, Utc};
#[cfg(feature = "postgres")]
use uuid::Uuid;

/// Column list shared by every payment SELECT.
pub const PAYMENT_COLUMNS: &str = "id, student_id, tuition_id, year, month, amount, paid_at";

// ─────────────────────────────────────────────────────────────────────────────
// Row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Payment row as stored by SQLite (ids and timestamps are TEXT).
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqlitePaymentRow {
    pub id: String,
    pub student_id: String,
    pub tuition_id: String,
    pub year: i32,
    pub month: String,
    pub amount: i64,
    pub paid_at: String,
}

#[cfg(feature = "sqlite")]
impl SqlitePaymentRow {
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        let id = uuid::Uuid::parse_str(&self.id).map_err(|e| RepoError::Database(e.to_string()))?;

        let paid_at = chrono::DateTime::parse_from_rfc3339(&self.paid_at)
            .map_err(|e| RepoError::Database(e.to_string()))?
            .with_timezone(&chrono::Utc);

        Ok(Payment::from_parts(
            PaymentId::from_uuid(id),
            self.student_id,
            self.tuition_id,
            parse_month(&self.month)?,
            self.year,
            self.amount,
            paid_at,
        ))
    }
}

/// Payment row as stored by PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgPaymentRow {
    pub id: Uuid,
    pub student_id: String,
    pub tuition_id: String,
    pub year: i32,
    pub month: String,
    pub amount: i64,
    pub paid_at: DateTime<Utc>,
}

#[cfg(feature = "postgres")]
impl PgPaymentRow {
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        Ok(Payment::from_parts(
            PaymentId::from_uuid(self.id),
            self.student_id,
            self.tuition_id,
            parse_month(&self.month)?,
            self.year,
            self.amount,
            self.paid_at,
        ))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn parse_month(raw: &str) -> Result<Month, RepoError> {
    raw.parse::<Month>()
        .map_err(|_| RepoError::Database(format!("Corrupt month value: {}", raw)))
}

/// Maps a write failure, turning unique-index violations into `Conflict`.
pub fn map_write_error(err: sqlx::Error) -> RepoError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Conflict(db.message().to_string())
        }
        _ => RepoError::Database(err.to_string()),
    }
}

pub fn map_read_error(err: sqlx::Error) -> RepoError {
    RepoError::Database(err.to_string())
}
