//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use tuition_types::{
    AppError, DomainError, Month, PaymentCreateRequest, PaymentRepository, PaymentResponse,
    RegistrationService, ResponseWrapper, StudentIdsResponse, SuccessStatus,
};

use crate::PaymentService;

/// Application state shared across handlers.
pub struct AppState<R: PaymentRepository, G: RegistrationService> {
    pub service: PaymentService<R, G>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status();

        let http_status = if status.is_client_error() {
            tracing::warn!(code = status.code(), "Request rejected: {}", self.0);
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(code = status.code(), "Request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        // Only the registration body is forwarded; internal detail stays in the logs.
        let data = match self.0 {
            AppError::Registration { body, .. } => Some(
                serde_json::from_str::<serde_json::Value>(&body)
                    .unwrap_or(serde_json::Value::String(body)),
            ),
            _ => None,
        };

        (http_status, Json(ResponseWrapper::error(status, data))).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Make a tuition payment for a student.
///
/// A body that cannot be parsed is treated like one with missing fields.
#[tracing::instrument(skip(state, payload))]
pub async fn create_payment<R: PaymentRepository, G: RegistrationService>(
    State(state): State<Arc<AppState<R, G>>>,
    payload: Result<Json<PaymentCreateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!("Unreadable payment request body: {}", rejection);
        AppError::MissingRequiredFields
    })?;

    let payment = state.service.create_payment(req).await?;

    tracing::debug!(
        student_id = %payment.student_id,
        tuition_id = %payment.tuition_id,
        "Made payment"
    );
    Ok(Json(ResponseWrapper::success(
        SuccessStatus::MadePayment,
        Some(PaymentResponse::from(payment)),
    )))
}

/// Optional query parameters for listing paying students.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PeriodQuery {
    /// Year of the month; defaults to the current year
    pub year: Option<i32>,
}

/// List ids of students who paid a tuition for a month.
///
/// An unknown month or an unreadable `year` is an invalid payment month.
#[tracing::instrument(skip(state))]
pub async fn get_all_student_ids_by_tuition_id_and_month<
    R: PaymentRepository,
    G: RegistrationService,
>(
    State(state): State<Arc<AppState<R, G>>>,
    Path((tuition_id, month)): Path<(String, String)>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let month: Month = month.parse()?;
    let Query(query) = query.map_err(|rejection| {
        AppError::InvalidPaymentMonth(format!("Invalid year: {}", rejection.body_text()))
    })?;
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    let student_ids = state
        .service
        .get_all_student_ids_by_tuition_id_and_month(&tuition_id, month, year)
        .await?;

    tracing::debug!(count = student_ids.len(), "Returned students who paid");
    Ok(Json(ResponseWrapper::success(
        SuccessStatus::ReadPayment,
        Some(StudentIdsResponse { student_ids }),
    )))
}

/// Delete every payment for a tuition.
#[tracing::instrument(skip(state))]
pub async fn delete_all_by_tuition_id<R: PaymentRepository, G: RegistrationService>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(tuition_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_all_by_tuition_id(&tuition_id).await?;
    Ok(Json(ResponseWrapper::<()>::success(
        SuccessStatus::DeletePayment,
        None,
    )))
}

/// Delete every payment made by a student.
#[tracing::instrument(skip(state))]
pub async fn delete_all_by_student_id<R: PaymentRepository, G: RegistrationService>(
    State(state): State<Arc<AppState<R, G>>>,
    Path(student_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_all_by_student_id(&student_id).await?;
    Ok(Json(ResponseWrapper::<()>::success(
        SuccessStatus::DeletePayment,
        None,
    )))
}
