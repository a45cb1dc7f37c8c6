//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BillingPeriod, Month, Payment, PaymentId, PaymentRequest};
use crate::error::DomainError;
use crate::status::{ErrorStatus, ResponseStatus, SuccessStatus};

/// Shown to end users on every error response.
pub const ERROR_DISPLAY_MESSAGE: &str = "Oops!! Something went wrong. Please try again.";

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a tuition payment.
///
/// Every field is optional on the wire so that a missing one can be reported
/// with its own status code instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreateRequest {
    #[schema(example = "sid-1")]
    pub student_id: Option<String>,
    #[schema(example = "tid-1")]
    pub tuition_id: Option<String>,
    /// Month being paid for, e.g. `JANUARY`
    #[schema(example = "JANUARY")]
    pub month: Option<String>,
    /// Year being paid for; defaults to the current year
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 2026)]
    pub year: Option<i32>,
    /// Amount in smallest currency unit
    #[schema(example = 10000)]
    pub amount: Option<i64>,
}

impl PaymentCreateRequest {
    /// Checks that every required field is present and usable.
    pub fn is_required_available(&self) -> bool {
        fn present(field: &Option<String>) -> bool {
            field.as_deref().is_some_and(|s| !s.trim().is_empty())
        }

        present(&self.student_id)
            && present(&self.tuition_id)
            && present(&self.month)
            && self.amount.is_some_and(|a| a > 0)
    }

    /// Converts into a domain request, defaulting the year to `current_year`.
    pub fn into_request(self, current_year: i32) -> Result<PaymentRequest, DomainError> {
        if !self.is_required_available() {
            return Err(DomainError::MissingRequiredFields);
        }

        let (Some(student_id), Some(tuition_id), Some(month), Some(amount)) =
            (self.student_id, self.tuition_id, self.month, self.amount)
        else {
            return Err(DomainError::MissingRequiredFields);
        };

        let month: Month = month.parse()?;

        Ok(PaymentRequest {
            student_id: student_id.trim().to_string(),
            tuition_id: tuition_id.trim().to_string(),
            period: BillingPeriod::new(self.year.unwrap_or(current_year), month),
            amount,
        })
    }
}

/// A recorded payment as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub payment_id: PaymentId,
    #[schema(example = "sid-1")]
    pub student_id: String,
    #[schema(example = "tid-1")]
    pub tuition_id: String,
    pub month: Month,
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 10000)]
    pub amount: i64,
    #[schema(value_type = String, example = "2026-01-05T10:00:00Z")]
    pub paid_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            payment_id: p.id,
            student_id: p.student_id,
            tuition_id: p.tuition_id,
            month: p.month,
            year: p.year,
            amount: p.amount,
            paid_at: p.paid_at,
        }
    }
}

/// Ids of students who paid a tuition for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdsResponse {
    #[schema(example = json!(["sid-1", "sid-2"]))]
    pub student_ids: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response wrapper
// ─────────────────────────────────────────────────────────────────────────────

/// Envelope around every API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseWrapper<T> {
    pub status: ResponseStatus,
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_message: Option<String>,
    pub status_code: u16,
}

impl<T> ResponseWrapper<T> {
    pub fn success(status: SuccessStatus, data: Option<T>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: status.message().to_string(),
            data,
            display_message: None,
            status_code: status.code(),
        }
    }

    pub fn error(status: ErrorStatus, data: Option<T>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: status.message().to_string(),
            data,
            display_message: Some(ERROR_DISPLAY_MESSAGE.to_string()),
            status_code: status.code(),
        }
    }
}
