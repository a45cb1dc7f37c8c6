//! Student enrollment snapshot obtained from the Registration service.

use serde::{Deserialize, Serialize};

use super::month::BillingPeriod;

/// A student's enrollment in one tuition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuitionEnrollment {
    pub tuition_id: String,
    /// First period the student may pay for
    pub enrolled_since: BillingPeriod,
}

/// Read-only view of which tuitions a student is enrolled in, and since when.
///
/// Never persisted locally; fetched fresh for every payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEnrollmentInfo {
    pub student_id: String,
    pub tuitions: Vec<TuitionEnrollment>,
}

impl StudentEnrollmentInfo {
    pub fn new(student_id: impl Into<String>, tuitions: Vec<TuitionEnrollment>) -> Self {
        Self {
            student_id: student_id.into(),
            tuitions,
        }
    }

    /// Returns the enrollment for `tuition_id`, if any.
    ///
    /// When the registration data lists the same tuition more than once the
    /// earliest start wins.
    pub fn enrollment_for(&self, tuition_id: &str) -> Option<&TuitionEnrollment> {
        self.tuitions
            .iter()
            .filter(|t| t.tuition_id == tuition_id)
            .min_by_key(|t| t.enrolled_since)
    }
}
