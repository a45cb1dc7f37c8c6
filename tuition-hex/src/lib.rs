//! # Tuition Hex
//!
//! Application service layer and adapters for the tuition payment service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates validation and persistence)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `outbound/` - Registration service HTTP client
//!
//! The service is generic over `R: PaymentRepository` and
//! `G: RegistrationService`, allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod outbound;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use outbound::registration::HttpRegistrationService;
pub use service::PaymentService;
