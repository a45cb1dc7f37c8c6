//! Outbound adapters for remote collaborators.

pub mod registration;
