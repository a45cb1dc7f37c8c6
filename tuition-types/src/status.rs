//! Response status codes and messages.
//!
//! The API reports outcomes with a numeric code alongside the HTTP status.
//! The set is closed: every response carries exactly one of these.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Top-level outcome indicator of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Success outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessStatus {
    MadePayment,
    ReadPayment,
    DeletePayment,
}

impl SuccessStatus {
    pub fn code(&self) -> u16 {
        match self {
            SuccessStatus::MadePayment => 2000,
            SuccessStatus::ReadPayment => 2001,
            SuccessStatus::DeletePayment => 2002,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SuccessStatus::MadePayment => "Successfully made the payment",
            SuccessStatus::ReadPayment => "Successfully read the payment",
            SuccessStatus::DeletePayment => "Successfully deleted the payment",
        }
    }
}

/// Error outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStatus {
    MissingRequiredFields,
    StudentNotEnrolledInTuition,
    InvalidPaymentMonth,
    PaymentAlreadyMade,
    InternalServerError,
    RegistrationInternalServerError,
}

impl ErrorStatus {
    pub fn code(&self) -> u16 {
        match self {
            ErrorStatus::MissingRequiredFields => 4001,
            ErrorStatus::StudentNotEnrolledInTuition => 4002,
            ErrorStatus::InvalidPaymentMonth => 4003,
            ErrorStatus::PaymentAlreadyMade => 4004,
            ErrorStatus::InternalServerError => 5000,
            ErrorStatus::RegistrationInternalServerError => 5001,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorStatus::MissingRequiredFields => "Missing required fields",
            ErrorStatus::StudentNotEnrolledInTuition => "Student not enrolled in tuition",
            ErrorStatus::InvalidPaymentMonth => "Invalid payment month",
            ErrorStatus::PaymentAlreadyMade => {
                "Payment to the given details have been made already"
            }
            ErrorStatus::InternalServerError => "Internal Server Error",
            ErrorStatus::RegistrationInternalServerError => {
                "Registration Service - Internal Server Error"
            }
        }
    }

    /// True for caller mistakes (4xxx), false for server-side failures (5xxx).
    pub fn is_client_error(&self) -> bool {
        self.code() < 5000
    }
}
