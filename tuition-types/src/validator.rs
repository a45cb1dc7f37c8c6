//! Payment eligibility rules.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. the student must be enrolled in the tuition,
//! 2. the period must not precede the enrollment start,
//! 3. the period must not already be paid.
//!
//! Callers that match on the returned error depend on this order.

use chrono::{DateTime, Utc};

use crate::domain::{Payment, PaymentRequest, StudentEnrollmentInfo};
use crate::error::{DomainError, RepoError};
use crate::ports::PaymentLookup;

/// Decides whether a payment request may be recorded.
pub struct PaymentValidator;

impl PaymentValidator {
    /// Validates `request` and builds the payment to persist.
    ///
    /// Lookup failures are returned as-is; rule violations are returned as
    /// [`RepoError::Domain`].
    pub async fn validate<L>(
        request: PaymentRequest,
        enrollment: &StudentEnrollmentInfo,
        lookup: &L,
        now: DateTime<Utc>,
    ) -> Result<Payment, RepoError>
    where
        L: PaymentLookup + ?Sized,
    {
        let tuition = enrollment
            .enrollment_for(&request.tuition_id)
            .ok_or_else(|| DomainError::StudentNotEnrolledInTuition {
                student_id: request.student_id.clone(),
                tuition_id: request.tuition_id.clone(),
            })?;

        if request.period < tuition.enrolled_since {
            return Err(DomainError::InvalidPaymentMonth {
                requested: request.period,
                enrolled_since: tuition.enrolled_since,
            }
            .into());
        }

        if lookup.payment_exists(&request.key()).await? {
            return Err(DomainError::PaymentAlreadyMade {
                student_id: request.student_id,
                tuition_id: request.tuition_id,
                period: request.period,
            }
            .into());
        }

        Ok(Payment::new(request, now))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::{BillingPeriod, Month, PaymentKey, TuitionEnrollment};

    /// Lookup backed by a fixed set of paid keys; counts how often it is asked.
    struct PaidKeys {
        keys: HashSet<PaymentKey>,
        calls: AtomicUsize,
    }

    impl PaidKeys {
        fn new(keys: impl IntoIterator<Item = PaymentKey>) -> Self {
            Self {
                keys: keys.into_iter().collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl PaymentLookup for PaidKeys {
        async fn payment_exists(&self, key: &PaymentKey) -> Result<bool, RepoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.keys.contains(key))
        }
    }

    struct FailingLookup;

    #[async_trait::async_trait]
    impl PaymentLookup for FailingLookup {
        async fn payment_exists(&self, _key: &PaymentKey) -> Result<bool, RepoError> {
            Err(RepoError::Database("connection reset".into()))
        }
    }

    fn enrolled_since_january() -> StudentEnrollmentInfo {
        StudentEnrollmentInfo::new(
            "sid-1",
            vec![TuitionEnrollment {
                tuition_id: "tid-1".to_string(),
                enrolled_since: BillingPeriod::new(2026, Month::January),
            }],
        )
    }

    fn request(tuition_id: &str, year: i32, month: Month, amount: i64) -> PaymentRequest {
        PaymentRequest {
            student_id: "sid-1".to_string(),
            tuition_id: tuition_id.to_string(),
            period: BillingPeriod::new(year, month),
            amount,
        }
    }

    #[tokio::test]
    async fn test_valid_request_builds_payment() {
        let lookup = PaidKeys::new([]);
        let now = Utc::now();

        let payment = PaymentValidator::validate(
            request("tid-1", 2026, Month::January, 100),
            &enrolled_since_january(),
            &lookup,
            now,
        )
        .await
        .unwrap();

        assert_eq!(payment.student_id, "sid-1");
        assert_eq!(payment.tuition_id, "tid-1");
        assert_eq!(payment.month, Month::January);
        assert_eq!(payment.amount, 100);
        assert_eq!(payment.paid_at, now);
    }

    #[tokio::test]
    async fn test_not_enrolled_regardless_of_month_or_amount() {
        let lookup = PaidKeys::new([]);
        for month in Month::ALL {
            for amount in [1, 100, 50_000] {
                let result = PaymentValidator::validate(
                    request("tid-2", 2026, month, amount),
                    &enrolled_since_january(),
                    &lookup,
                    Utc::now(),
                )
                .await;
                assert!(matches!(
                    result,
                    Err(RepoError::Domain(DomainError::StudentNotEnrolledInTuition { .. }))
                ));
            }
        }
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_month_before_enrollment_is_invalid() {
        let lookup = PaidKeys::new([]);

        let result = PaymentValidator::validate(
            request("tid-1", 2025, Month::December, 100),
            &enrolled_since_january(),
            &lookup,
            Utc::now(),
        )
        .await;

        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::InvalidPaymentMonth { .. }))
        ));
    }

    #[tokio::test]
    async fn test_month_check_runs_before_duplicate_check() {
        // Even an already-paid key reports the month problem first.
        let early = request("tid-1", 2025, Month::June, 100);
        let lookup = PaidKeys::new([early.key()]);

        let result =
            PaymentValidator::validate(early, &enrolled_since_january(), &lookup, Utc::now())
                .await;

        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::InvalidPaymentMonth { .. }))
        ));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_existing_payment_is_rejected() {
        let paid = request("tid-1", 2026, Month::March, 100);
        let lookup = PaidKeys::new([paid.key()]);

        let result =
            PaymentValidator::validate(paid, &enrolled_since_january(), &lookup, Utc::now()).await;

        assert!(matches!(
            result,
            Err(RepoError::Domain(DomainError::PaymentAlreadyMade { .. }))
        ));
    }

    #[tokio::test]
    async fn test_same_month_other_year_is_not_a_duplicate() {
        let lookup = PaidKeys::new([request("tid-1", 2026, Month::March, 100).key()]);

        let result = PaymentValidator::validate(
            request("tid-1", 2027, Month::March, 100),
            &enrolled_since_january(),
            &lookup,
            Utc::now(),
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let result = PaymentValidator::validate(
            request("tid-1", 2026, Month::May, 100),
            &enrolled_since_january(),
            &FailingLookup,
            Utc::now(),
        )
        .await;

        assert!(matches!(result, Err(RepoError::Database(_))));
    }
}
