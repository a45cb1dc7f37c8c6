//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod registration;
mod repository;

pub use registration::RegistrationService;
pub use repository::{PaymentLookup, PaymentRepository};
