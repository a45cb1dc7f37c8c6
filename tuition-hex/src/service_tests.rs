//! PaymentService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use tuition_types::{
        AppError, BillingPeriod, Month, Payment, PaymentCreateRequest, PaymentId, PaymentKey,
        PaymentLookup, PaymentRepository, PaymentRequest, RegistrationError, RegistrationService,
        RepoError, StudentEnrollmentInfo, TuitionEnrollment,
    };

    use crate::PaymentService;

    /// Simple in-memory repository for testing the service layer.
    ///
    /// Enforces one payment per key the same way the SQL unique index does.
    pub struct MockRepo {
        payments: Mutex<Vec<Payment>>,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                payments: Mutex::new(Vec::new()),
            }
        }

        pub fn len(&self) -> usize {
            self.payments.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PaymentLookup for MockRepo {
        async fn payment_exists(&self, key: &PaymentKey) -> Result<bool, RepoError> {
            Ok(self
                .payments
                .lock()
                .unwrap()
                .iter()
                .any(|p| &p.key() == key))
        }
    }

    #[async_trait]
    impl PaymentRepository for MockRepo {
        async fn insert_payment(&self, payment: &Payment) -> Result<Payment, RepoError> {
            let mut payments = self.payments.lock().unwrap();
            if payments.iter().any(|p| p.key() == payment.key()) {
                return Err(RepoError::Conflict("duplicate payment".into()));
            }
            payments.push(payment.clone());
            Ok(payment.clone())
        }

        async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
            Ok(self
                .payments
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        async fn find_student_ids_by_tuition_and_month(
            &self,
            tuition_id: &str,
            year: i32,
            month: Month,
        ) -> Result<Vec<String>, RepoError> {
            let mut ids: Vec<String> = self
                .payments
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.tuition_id == tuition_id && p.year == year && p.month == month)
                .map(|p| p.student_id.clone())
                .collect();
            ids.sort();
            ids.dedup();
            Ok(ids)
        }

        async fn delete_all_by_tuition_id(&self, tuition_id: &str) -> Result<u64, RepoError> {
            let mut payments = self.payments.lock().unwrap();
            let before = payments.len();
            payments.retain(|p| p.tuition_id != tuition_id);
            Ok((before - payments.len()) as u64)
        }

        async fn delete_all_by_student_id(&self, student_id: &str) -> Result<u64, RepoError> {
            let mut payments = self.payments.lock().unwrap();
            let before = payments.len();
            payments.retain(|p| p.student_id != student_id);
            Ok((before - payments.len()) as u64)
        }
    }

    /// Repository whose pre-check never sees existing rows, as happens when
    /// two requests for the same key interleave.
    struct RacingRepo(MockRepo);

    #[async_trait]
    impl PaymentLookup for RacingRepo {
        async fn payment_exists(&self, _key: &PaymentKey) -> Result<bool, RepoError> {
            Ok(false)
        }
    }

    #[async_trait]
    impl PaymentRepository for RacingRepo {
        async fn insert_payment(&self, payment: &Payment) -> Result<Payment, RepoError> {
            self.0.insert_payment(payment).await
        }

        async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
            self.0.get_payment(id).await
        }

        async fn find_student_ids_by_tuition_and_month(
            &self,
            tuition_id: &str,
            year: i32,
            month: Month,
        ) -> Result<Vec<String>, RepoError> {
            self.0
                .find_student_ids_by_tuition_and_month(tuition_id, year, month)
                .await
        }

        async fn delete_all_by_tuition_id(&self, tuition_id: &str) -> Result<u64, RepoError> {
            self.0.delete_all_by_tuition_id(tuition_id).await
        }

        async fn delete_all_by_student_id(&self, student_id: &str) -> Result<u64, RepoError> {
            self.0.delete_all_by_student_id(student_id).await
        }
    }

    /// Canned registration service; unknown students answer with a 404.
    pub struct MockRegistration {
        students: HashMap<String, StudentEnrollmentInfo>,
        calls: AtomicUsize,
    }

    impl MockRegistration {
        pub fn new() -> Self {
            Self {
                students: HashMap::new(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_enrollment(
            mut self,
            student_id: &str,
            tuition_id: &str,
            since: BillingPeriod,
        ) -> Self {
            let info = self
                .students
                .entry(student_id.to_string())
                .or_insert_with(|| StudentEnrollmentInfo::new(student_id, Vec::new()));
            info.tuitions.push(TuitionEnrollment {
                tuition_id: tuition_id.to_string(),
                enrolled_since: since,
            });
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RegistrationService for MockRegistration {
        async fn get_student_info(
            &self,
            student_id: &str,
        ) -> Result<StudentEnrollmentInfo, RegistrationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.students
                .get(student_id)
                .cloned()
                .ok_or_else(|| RegistrationError::Remote {
                    status: 404,
                    body: r#"{"status":"ERROR","statusCode":4002}"#.to_string(),
                })
        }
    }

    fn jan(year: i32) -> BillingPeriod {
        BillingPeriod::new(year, Month::January)
    }

    fn request(student: &str, tuition: &str, month: &str, year: i32) -> PaymentCreateRequest {
        PaymentCreateRequest {
            student_id: Some(student.to_string()),
            tuition_id: Some(tuition.to_string()),
            month: Some(month.to_string()),
            year: Some(year),
            amount: Some(10_000),
        }
    }

    fn service() -> PaymentService<MockRepo, MockRegistration> {
        PaymentService::new(
            MockRepo::new(),
            MockRegistration::new().with_enrollment("sid-1", "tid-1", jan(2026)),
        )
    }

    #[tokio::test]
    async fn test_create_payment_success() {
        let service = service();

        let payment = service
            .create_payment(request("sid-1", "tid-1", "JANUARY", 2026))
            .await
            .unwrap();

        assert_eq!(payment.student_id, "sid-1");
        assert_eq!(payment.period(), jan(2026));
        assert_eq!(payment.amount, 10_000);

        let stored = service.get_payment(payment.id).await.unwrap().unwrap();
        assert_eq!(stored, payment);
    }

    #[tokio::test]
    async fn test_month_is_case_insensitive() {
        let service = service();

        let payment = service
            .create_payment(request("sid-1", "tid-1", "february", 2026))
            .await
            .unwrap();

        assert_eq!(payment.month, Month::February);
    }

    #[tokio::test]
    async fn test_month_before_enrollment_is_rejected() {
        let service = service();

        let result = service
            .create_payment(request("sid-1", "tid-1", "DECEMBER", 2025))
            .await;

        assert!(matches!(result, Err(AppError::InvalidPaymentMonth(_))));
        assert_eq!(service.repo().len(), 0);
    }

    #[tokio::test]
    async fn test_second_payment_for_same_month_is_rejected() {
        let service = service();

        service
            .create_payment(request("sid-1", "tid-1", "JANUARY", 2026))
            .await
            .unwrap();
        let result = service
            .create_payment(request("sid-1", "tid-1", "JANUARY", 2026))
            .await;

        assert!(matches!(result, Err(AppError::PaymentAlreadyMade(_))));
        assert_eq!(service.repo().len(), 1);
    }

    #[tokio::test]
    async fn test_unenrolled_tuition_is_rejected() {
        let service = service();

        let result = service
            .create_payment(request("sid-1", "tid-9", "JANUARY", 2026))
            .await;

        assert!(matches!(result, Err(AppError::StudentNotEnrolledInTuition(_))));
    }

    #[tokio::test]
    async fn test_missing_fields_skip_registration() {
        let service = service();

        let result = service
            .create_payment(PaymentCreateRequest {
                amount: None,
                ..request("sid-1", "tid-1", "JANUARY", 2026)
            })
            .await;

        assert!(matches!(result, Err(AppError::MissingRequiredFields)));
        assert_eq!(service.registration().calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_month_is_invalid_payment_month() {
        let service = service();

        let result = service
            .create_payment(request("sid-1", "tid-1", "SMARCH", 2026))
            .await;

        assert!(matches!(result, Err(AppError::InvalidPaymentMonth(_))));
    }

    #[tokio::test]
    async fn test_registration_failure_is_forwarded() {
        let service = service();

        let result = service
            .create_payment(request("sid-404", "tid-1", "JANUARY", 2026))
            .await;

        match result {
            Err(AppError::Registration { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("4002"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(service.repo().len(), 0);
    }

    #[tokio::test]
    async fn test_storage_conflict_maps_to_payment_already_made() {
        let service = PaymentService::new(RacingRepo(MockRepo::new()), MockRegistration::new());
        let enrollment = StudentEnrollmentInfo::new(
            "sid-1",
            vec![TuitionEnrollment {
                tuition_id: "tid-1".into(),
                enrolled_since: jan(2026),
            }],
        );
        let req = PaymentRequest {
            student_id: "sid-1".into(),
            tuition_id: "tid-1".into(),
            period: jan(2026),
            amount: 500,
        };

        service
            .make_tuition_payment(req.clone(), &enrollment)
            .await
            .unwrap();
        let result = service.make_tuition_payment(req, &enrollment).await;

        assert!(matches!(result, Err(AppError::PaymentAlreadyMade(_))));
    }

    #[tokio::test]
    async fn test_list_is_distinct_and_scoped_to_period() {
        let registration = MockRegistration::new()
            .with_enrollment("sid-1", "tid-1", jan(2025))
            .with_enrollment("sid-2", "tid-1", jan(2025));
        let service = PaymentService::new(MockRepo::new(), registration);

        for (student, year) in [("sid-1", 2026), ("sid-2", 2026), ("sid-2", 2025)] {
            service
                .create_payment(request(student, "tid-1", "MARCH", year))
                .await
                .unwrap();
        }

        let ids = service
            .get_all_student_ids_by_tuition_id_and_month("tid-1", Month::March, 2026)
            .await
            .unwrap();
        assert_eq!(ids, vec!["sid-1".to_string(), "sid-2".to_string()]);

        let ids = service
            .get_all_student_ids_by_tuition_id_and_month("tid-1", Month::April, 2026)
            .await
            .unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_tuition_then_list_is_empty() {
        let service = service();
        service
            .create_payment(request("sid-1", "tid-1", "JANUARY", 2026))
            .await
            .unwrap();

        assert_eq!(service.delete_all_by_tuition_id("tid-1").await.unwrap(), 1);
        assert_eq!(service.delete_all_by_tuition_id("tid-1").await.unwrap(), 0);

        let ids = service
            .get_all_student_ids_by_tuition_id_and_month("tid-1", Month::January, 2026)
            .await
            .unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_student_allows_paying_again() {
        let service = service();
        service
            .create_payment(request("sid-1", "tid-1", "JANUARY", 2026))
            .await
            .unwrap();

        assert_eq!(service.delete_all_by_student_id("sid-1").await.unwrap(), 1);

        service
            .create_payment(request("sid-1", "tid-1", "JANUARY", 2026))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_payment_not_found() {
        let service = service();

        let result = service.get_payment(PaymentId::new()).await.unwrap();

        assert!(result.is_none());
    }
}
