//! Payment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::month::{BillingPeriod, Month};

/// Unique identifier for a Payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "123e4567-e89b-12d3-a456-426614174000")]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random PaymentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PaymentId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The identity of a monthly fee: who paid, for which tuition, for which period.
///
/// At most one Payment exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaymentKey {
    pub student_id: String,
    pub tuition_id: String,
    pub period: BillingPeriod,
}

/// A payment request whose required fields are all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub student_id: String,
    pub tuition_id: String,
    pub period: BillingPeriod,
    /// Amount in the smallest currency unit
    pub amount: i64,
}

impl PaymentRequest {
    pub fn key(&self) -> PaymentKey {
        PaymentKey {
            student_id: self.student_id.clone(),
            tuition_id: self.tuition_id.clone(),
            period: self.period,
        }
    }
}

/// A recorded tuition fee payment.
///
/// Payments are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub student_id: String,
    pub tuition_id: String,
    pub month: Month,
    pub year: i32,
    /// Amount in the smallest currency unit
    pub amount: i64,
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new payment for a validated request.
    pub fn new(request: PaymentRequest, paid_at: DateTime<Utc>) -> Self {
        Self {
            id: PaymentId::new(),
            student_id: request.student_id,
            tuition_id: request.tuition_id,
            month: request.period.month,
            year: request.period.year,
            amount: request.amount,
            paid_at,
        }
    }

    /// Reconstructs a payment from stored fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: PaymentId,
        student_id: String,
        tuition_id: String,
        month: Month,
        year: i32,
        amount: i64,
        paid_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            student_id,
            tuition_id,
            month,
            year,
            amount,
            paid_at,
        }
    }

    pub fn period(&self) -> BillingPeriod {
        BillingPeriod::new(self.year, self.month)
    }

    pub fn key(&self) -> PaymentKey {
        PaymentKey {
            student_id: self.student_id.clone(),
            tuition_id: self.tuition_id.clone(),
            period: self.period(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            student_id: "sid-1".to_string(),
            tuition_id: "tid-1".to_string(),
            period: BillingPeriod::new(2026, Month::March),
            amount: 100,
        }
    }

    #[test]
    fn test_payment_creation_copies_request() {
        let now = Utc::now();
        let payment = Payment::new(request(), now);

        assert_eq!(payment.student_id, "sid-1");
        assert_eq!(payment.tuition_id, "tid-1");
        assert_eq!(payment.month, Month::March);
        assert_eq!(payment.year, 2026);
        assert_eq!(payment.amount, 100);
        assert_eq!(payment.paid_at, now);
        assert_eq!(payment.key(), request().key());
    }

    #[test]
    fn test_payments_get_distinct_ids() {
        let a = Payment::new(request(), Utc::now());
        let b = Payment::new(request(), Utc::now());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_payment_id_round_trips_through_string() {
        let id = PaymentId::new();
        let parsed: PaymentId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
