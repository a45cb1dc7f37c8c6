//! Error types for the tuition payment service.

use crate::domain::BillingPeriod;
use crate::status::ErrorStatus;

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Missing required fields")]
    MissingRequiredFields,

    #[error("Student {student_id} is not enrolled in tuition {tuition_id}")]
    StudentNotEnrolledInTuition {
        student_id: String,
        tuition_id: String,
    },

    #[error("Cannot pay for {requested}: enrolled since {enrolled_since}")]
    InvalidPaymentMonth {
        requested: BillingPeriod,
        enrolled_since: BillingPeriod,
    },

    #[error("Payment already made by {student_id} for tuition {tuition_id} in {period}")]
    PaymentAlreadyMade {
        student_id: String,
        tuition_id: String,
        period: BillingPeriod,
    },

    #[error("Unknown month: {0}")]
    InvalidMonth(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    /// A uniqueness constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Failures talking to the Registration service.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// The service answered with a 4xx/5xx status.
    #[error("{status} Failed to get student info")]
    Remote { status: u16, body: String },

    #[error("Registration service unreachable: {0}")]
    Transport(String),

    #[error("Invalid registration response: {0}")]
    Decode(String),
}

/// Application-level errors (for HTTP responses).
///
/// Each variant corresponds to exactly one [`ErrorStatus`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required fields")]
    MissingRequiredFields,

    #[error("{0}")]
    StudentNotEnrolledInTuition(String),

    #[error("{0}")]
    InvalidPaymentMonth(String),

    #[error("{0}")]
    PaymentAlreadyMade(String),

    #[error("Registration service error: {status}")]
    Registration { status: u16, body: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> ErrorStatus {
        match self {
            AppError::MissingRequiredFields => ErrorStatus::MissingRequiredFields,
            AppError::StudentNotEnrolledInTuition(_) => ErrorStatus::StudentNotEnrolledInTuition,
            AppError::InvalidPaymentMonth(_) => ErrorStatus::InvalidPaymentMonth,
            AppError::PaymentAlreadyMade(_) => ErrorStatus::PaymentAlreadyMade,
            AppError::Registration { .. } => ErrorStatus::RegistrationInternalServerError,
            AppError::Internal(_) => ErrorStatus::InternalServerError,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingRequiredFields => AppError::MissingRequiredFields,
            e @ DomainError::StudentNotEnrolledInTuition { .. } => {
                AppError::StudentNotEnrolledInTuition(e.to_string())
            }
            e @ (DomainError::InvalidPaymentMonth { .. } | DomainError::InvalidMonth(_)) => {
                AppError::InvalidPaymentMonth(e.to_string())
            }
            e @ DomainError::PaymentAlreadyMade { .. } => AppError::PaymentAlreadyMade(e.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            // The only uniqueness constraint is the one-payment-per-month key.
            RepoError::Conflict(e) => AppError::PaymentAlreadyMade(e),
            RepoError::Database(e) => AppError::Internal(e),
        }
    }
}

impl From<RegistrationError> for AppError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Remote { status, body } => AppError::Registration { status, body },
            e => AppError::Internal(e.to_string()),
        }
    }
}
