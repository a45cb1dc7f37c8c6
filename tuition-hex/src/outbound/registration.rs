//! Reqwest-backed Registration service adapter.
//!
//! Owns transport details only: URL building, the request timeout, HTTP error
//! mapping, and decoding the registration payload into domain enrollments.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use tuition_types::{
    BillingPeriod, RegistrationError, RegistrationService, StudentEnrollmentInfo,
    TuitionEnrollment,
};

/// Path of the student info endpoint; `{studentId}` is substituted per call.
pub const DEFAULT_STUDENT_INFO_PATH: &str = "/api/v1/student/get/{studentId}";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const STUDENT_ID_PLACEHOLDER: &str = "{studentId}";

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct StudentResponseWrapper {
    data: Option<StudentResponseDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentResponseDto {
    student_id: String,
    #[serde(default)]
    tuitions: Vec<TuitionEnrollmentDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TuitionEnrollmentDto {
    tuition_id: String,
    /// ISO date (`2026-01-15`) or RFC 3339 timestamp
    enrolled_on: String,
}

impl StudentResponseDto {
    fn into_domain(self) -> Result<StudentEnrollmentInfo, RegistrationError> {
        let tuitions = self
            .tuitions
            .into_iter()
            .map(|t| {
                let date = parse_enrolled_on(&t.enrolled_on)?;
                Ok(TuitionEnrollment {
                    tuition_id: t.tuition_id,
                    enrolled_since: BillingPeriod::from_date(date),
                })
            })
            .collect::<Result<Vec<_>, RegistrationError>>()?;

        Ok(StudentEnrollmentInfo::new(self.student_id, tuitions))
    }
}

fn parse_enrolled_on(raw: &str) -> Result<NaiveDate, RegistrationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| RegistrationError::Decode(format!("Invalid enrolledOn value: {}", raw)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Adapter
// ─────────────────────────────────────────────────────────────────────────────

/// Registration client performing one GET per lookup.
///
/// No retries and no caching; the only bound on a call is the client timeout.
pub struct HttpRegistrationService {
    client: Client,
    base_url: Url,
    student_info_path: String,
}

impl HttpRegistrationService {
    /// Builds a client for `base_url` + `student_info_path`.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` is not an absolute http(s) URL or the
    /// reqwest client cannot be constructed.
    pub fn new(
        base_url: &str,
        student_info_path: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Registration base URL cannot carry a path: {}", base_url);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            student_info_path: student_info_path.to_string(),
        })
    }

    /// Appends the path template to the base URL, substituting the id as a
    /// single percent-encoded segment.
    fn student_info_url(&self, student_id: &str) -> Result<Url, RegistrationError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                RegistrationError::Transport(format!("Invalid base URL: {}", self.base_url))
            })?;
            segments.pop_if_empty();
            for segment in self.student_info_path.split('/').filter(|s| !s.is_empty()) {
                if segment == STUDENT_ID_PLACEHOLDER {
                    segments.push(student_id);
                } else {
                    segments.push(segment);
                }
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl RegistrationService for HttpRegistrationService {
    #[tracing::instrument(skip(self))]
    async fn get_student_info(
        &self,
        student_id: &str,
    ) -> Result<StudentEnrollmentInfo, RegistrationError> {
        let url = self.student_info_url(student_id)?;
        tracing::debug!(%url, "Calling registration service to get student info");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RegistrationError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read registration error body");
                    String::new()
                }
            };
            tracing::warn!(status = status.as_u16(), "Registration service rejected student info request");
            return Err(RegistrationError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let wrapper: StudentResponseWrapper = resp
            .json()
            .await
            .map_err(|e| RegistrationError::Decode(e.to_string()))?;

        let info = wrapper
            .data
            .ok_or_else(|| RegistrationError::Decode("Missing student data".into()))?
            .into_domain()?;

        tracing::debug!(
            status = status.as_u16(),
            tuitions = info.tuitions.len(),
            "Getting student info by student id was successful"
        );
        Ok(info)
    }
}
