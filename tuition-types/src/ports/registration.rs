//! Registration service port.
//!
//! Enrollment data lives in a separate microservice. The HTTP adapter
//! implements this trait; tests substitute a canned implementation.

use crate::domain::StudentEnrollmentInfo;
use crate::error::RegistrationError;

/// Port trait for looking up a student's enrollments.
#[async_trait::async_trait]
pub trait RegistrationService: Send + Sync + 'static {
    /// Fetches the current enrollment snapshot for `student_id`.
    ///
    /// Performs exactly one remote call; no retries, no caching.
    async fn get_student_info(
        &self,
        student_id: &str,
    ) -> Result<StudentEnrollmentInfo, RegistrationError>;
}
