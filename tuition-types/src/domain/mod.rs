//! Domain models for the tuition payment service.

pub mod enrollment;
pub mod month;
pub mod payment;

pub use enrollment::{StudentEnrollmentInfo, TuitionEnrollment};
pub use month::{BillingPeriod, Month};
pub use payment::{Payment, PaymentId, PaymentKey, PaymentRequest};
