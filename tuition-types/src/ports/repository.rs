//! Repository port traits.
//!
//! Adapters (Postgres, SQLite, in-memory) implement these traits.

use crate::domain::{Month, Payment, PaymentId, PaymentKey};
use crate::error::RepoError;

/// Existence check used by the validator before a payment is written.
#[async_trait::async_trait]
pub trait PaymentLookup: Send + Sync {
    /// Returns true if a payment is already recorded for `key`.
    async fn payment_exists(&self, key: &PaymentKey) -> Result<bool, RepoError>;
}

/// The persistence port for payment records.
///
/// Implementations MUST enforce one payment per [`PaymentKey`] at the
/// storage level and report a violation as [`RepoError::Conflict`]. The
/// validator's pre-check does not protect against concurrent inserts.
#[async_trait::async_trait]
pub trait PaymentRepository: PaymentLookup + 'static {
    /// Persists a new payment.
    async fn insert_payment(&self, payment: &Payment) -> Result<Payment, RepoError>;

    /// Gets a payment by ID.
    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;

    /// Distinct ids of students who paid `tuition_id` for the given month.
    async fn find_student_ids_by_tuition_and_month(
        &self,
        tuition_id: &str,
        year: i32,
        month: Month,
    ) -> Result<Vec<String>, RepoError>;

    /// Removes every payment for a tuition. Returns the number removed.
    async fn delete_all_by_tuition_id(&self, tuition_id: &str) -> Result<u64, RepoError>;

    /// Removes every payment made by a student. Returns the number removed.
    async fn delete_all_by_student_id(&self, student_id: &str) -> Result<u64, RepoError>;
}
