//! Payment Application Service
//!
//! Orchestrates enrollment lookups, validation and persistence through the
//! port traits. Contains NO infrastructure logic.

use chrono::{DateTime, Datelike, Utc};

use tuition_types::{
    AppError, DomainError, Month, Payment, PaymentCreateRequest, PaymentId, PaymentRepository,
    PaymentRequest, PaymentValidator, RegistrationService, RepoError, StudentEnrollmentInfo,
};

/// Application service for tuition payments.
///
/// Generic over the repository and the registration client - adapters are
/// injected at compile time so tests can swap in in-memory versions.
pub struct PaymentService<R: PaymentRepository, G: RegistrationService> {
    repo: R,
    registration: G,
}

impl<R: PaymentRepository, G: RegistrationService> PaymentService<R, G> {
    /// Creates a new payment service.
    pub fn new(repo: R, registration: G) -> Self {
        Self { repo, registration }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the registration client.
    pub fn registration(&self) -> &G {
        &self.registration
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment creation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Full creation flow: required-field check, enrollment lookup, then
    /// [`Self::make_tuition_payment`].
    ///
    /// The registration service is not called for incomplete requests.
    #[tracing::instrument(skip(self, req))]
    pub async fn create_payment(&self, req: PaymentCreateRequest) -> Result<Payment, AppError> {
        let now = Utc::now();
        let request = req.into_request(now.year())?;

        let enrollment = self
            .registration
            .get_student_info(&request.student_id)
            .await?;

        self.make_tuition_payment_at(request, &enrollment, now)
            .await
    }

    /// Validates and records a payment for an already-fetched enrollment.
    pub async fn make_tuition_payment(
        &self,
        request: PaymentRequest,
        enrollment: &StudentEnrollmentInfo,
    ) -> Result<Payment, AppError> {
        self.make_tuition_payment_at(request, enrollment, Utc::now())
            .await
    }

    #[tracing::instrument(
        skip(self, request, enrollment),
        fields(student_id = %request.student_id, tuition_id = %request.tuition_id, period = %request.period)
    )]
    async fn make_tuition_payment_at(
        &self,
        request: PaymentRequest,
        enrollment: &StudentEnrollmentInfo,
        now: DateTime<Utc>,
    ) -> Result<Payment, AppError> {
        let payment = PaymentValidator::validate(request, enrollment, &self.repo, now).await?;

        // The pre-check above can race with a concurrent request for the same
        // key; the storage constraint is what actually rejects the duplicate.
        let payment = match self.repo.insert_payment(&payment).await {
            Ok(saved) => saved,
            Err(RepoError::Conflict(_)) => {
                return Err(DomainError::PaymentAlreadyMade {
                    student_id: payment.student_id.clone(),
                    tuition_id: payment.tuition_id.clone(),
                    period: payment.period(),
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(payment_id = %payment.id, "Made payment");
        Ok(payment)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries & bulk deletes
    // ─────────────────────────────────────────────────────────────────────────────

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, AppError> {
        self.repo.get_payment(id).await.map_err(Into::into)
    }

    /// Distinct ids of students who paid `tuition_id` for the given month.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_student_ids_by_tuition_id_and_month(
        &self,
        tuition_id: &str,
        month: Month,
        year: i32,
    ) -> Result<Vec<String>, AppError> {
        self.repo
            .find_student_ids_by_tuition_and_month(tuition_id, year, month)
            .await
            .map_err(Into::into)
    }

    /// Removes every payment for a tuition. Succeeds when there are none.
    #[tracing::instrument(skip(self))]
    pub async fn delete_all_by_tuition_id(&self, tuition_id: &str) -> Result<u64, AppError> {
        self.repo
            .delete_all_by_tuition_id(tuition_id)
            .await
            .map_err(Into::into)
    }

    /// Removes every payment made by a student. Succeeds when there are none.
    #[tracing::instrument(skip(self))]
    pub async fn delete_all_by_student_id(&self, student_id: &str) -> Result<u64, AppError> {
        self.repo
            .delete_all_by_student_id(student_id)
            .await
            .map_err(Into::into)
    }
}
