//! # Tuition Types
//!
//! Domain types, business rules and port traits for the tuition payment
//! service. This crate has no IO dependencies - only data structures, the
//! payment eligibility rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the innermost core of the hexagonal architecture:
//! - `domain/` - Pure domain types (Month, BillingPeriod, Payment, enrollments)
//! - `validator/` - Payment eligibility checks
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `status/` - Closed set of response codes and messages
//! - `error/` - Domain, repository, registration and application errors

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod status;
pub mod validator;

// Re-export commonly used types
pub use domain::{
    BillingPeriod, Month, Payment, PaymentId, PaymentKey, PaymentRequest, StudentEnrollmentInfo,
    TuitionEnrollment,
};
pub use dto::*;
pub use error::{AppError, DomainError, RegistrationError, RepoError};
pub use ports::{PaymentLookup, PaymentRepository, RegistrationService};
pub use status::{ErrorStatus, ResponseStatus, SuccessStatus};
pub use validator::PaymentValidator;
