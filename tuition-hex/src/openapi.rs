//! OpenAPI document for the HTTP API.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use tuition_types::domain::{BillingPeriod, Month, PaymentId};
use tuition_types::dto::{PaymentCreateRequest, PaymentResponse, StudentIdsResponse};
use tuition_types::status::ResponseStatus;
use utoipa::OpenApi;

use crate::inbound::PeriodQuery;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Make a tuition payment
///
/// Looks up the student's enrollments in the Registration service, checks
/// enrollment, month eligibility and duplicates (in that order), then
/// records the payment.
#[utoipa::path(
    post,
    path = "/api/v1/payment/create",
    tag = "payments",
    request_body = PaymentCreateRequest,
    responses(
        (status = 200, description = "Payment made (code 2000); `data` is a PaymentResponse", body = inline(serde_json::Value),
            example = json!({"status": "SUCCESS", "message": "Successfully made the payment", "data": {"paymentId": "123e4567-e89b-12d3-a456-426614174000", "studentId": "sid-1", "tuitionId": "tid-1", "month": "JANUARY", "year": 2026, "amount": 10000, "paidAt": "2026-01-05T10:00:00Z"}, "statusCode": 2000})),
        (status = 400, description = "Missing required fields (4001), student not enrolled (4002), invalid payment month (4003) or payment already made (4004)", body = inline(serde_json::Value),
            example = json!({"status": "ERROR", "message": "Payment to the given details have been made already", "data": null, "displayMessage": "Oops!! Something went wrong. Please try again.", "statusCode": 4004})),
        (status = 500, description = "Internal error (5000) or Registration service failure (5001, upstream body in `data`)", body = inline(serde_json::Value))
    )
)]
async fn create_payment() {}

/// List students who paid a tuition for a month
#[utoipa::path(
    get,
    path = "/api/v1/payment/get/all/{tuitionId}/{month}",
    tag = "payments",
    params(
        ("tuitionId" = String, Path, description = "Tuition ID"),
        ("month" = Month, Path, description = "Month, e.g. JANUARY"),
        PeriodQuery,
    ),
    responses(
        (status = 200, description = "Student ids (code 2001); `data` is a StudentIdsResponse", body = inline(serde_json::Value),
            example = json!({"status": "SUCCESS", "message": "Successfully read the payment", "data": {"studentIds": ["sid-1", "sid-2"]}, "statusCode": 2001})),
        (status = 400, description = "Unknown month or unreadable year (4003)"),
        (status = 500, description = "Internal error (5000)")
    )
)]
async fn get_all_student_ids_by_tuition_id_and_month() {}

/// Delete all payments for a tuition
#[utoipa::path(
    delete,
    path = "/api/v1/payment/delete/all/tuition/{tuitionId}",
    tag = "payments",
    params(
        ("tuitionId" = String, Path, description = "Tuition ID")
    ),
    responses(
        (status = 200, description = "Payments deleted (code 2002)"),
        (status = 500, description = "Internal error (5000)")
    )
)]
async fn delete_all_by_tuition_id() {}

/// Delete all payments made by a student
#[utoipa::path(
    delete,
    path = "/api/v1/payment/delete/all/student/{studentId}",
    tag = "payments",
    params(
        ("studentId" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Payments deleted (code 2002)"),
        (status = 500, description = "Internal error (5000)")
    )
)]
async fn delete_all_by_student_id() {}

/// OpenAPI documentation for the Tuition Payment API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tuition Payment Service API",
        version = "1.0.0",
        description = "Records monthly tuition payments for students enrolled through the Registration service.\n\nEvery response is wrapped as `{status, message, data, displayMessage, statusCode}` where `statusCode` is a service-specific code (2000-2002 on success, 4001-4004 and 5000-5001 on failure).",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_payment,
        get_all_student_ids_by_tuition_id_and_month,
        delete_all_by_tuition_id,
        delete_all_by_student_id,
    ),
    components(
        schemas(
            PaymentCreateRequest,
            PaymentResponse,
            StudentIdsResponse,
            ResponseStatus,
            Month,
            BillingPeriod,
            PaymentId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Tuition payment operations"),
    )
)]
pub struct ApiDoc;
