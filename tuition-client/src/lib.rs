//! # Tuition Client SDK
//!
//! A typed Rust client for the Tuition Payment API.
//!
//! Every response from the API is wrapped in a [`ResponseWrapper`]; this
//! client unwraps successful responses and turns error envelopes into
//! [`ClientError::Api`] carrying the service status code.

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use tuition_types::{
    Month, PaymentCreateRequest, PaymentResponse, ResponseStatus, ResponseWrapper,
    StudentIdsResponse,
};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error envelope (or an unreadable failure).
    #[error("API error: {status_code} - {message}")]
    Api {
        status_code: u16,
        message: String,
        data: Option<serde_json::Value>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response is missing data")]
    MissingData,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Tuition Payment API client.
pub struct TuitionClient {
    base_url: String,
    http: Client,
}

impl TuitionClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Builds `base_url` + `segments`, percent-encoding each segment so ids
    /// cannot escape their place in the path.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let invalid = || ClientError::InvalidBaseUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(self.url(&["health"])?).send().await?;
        Ok(resp.status().is_success())
    }

    /// Makes a tuition payment.
    pub async fn create_payment(
        &self,
        student_id: &str,
        tuition_id: &str,
        month: Month,
        year: Option<i32>,
        amount: i64,
    ) -> Result<PaymentResponse, ClientError> {
        let req = PaymentCreateRequest {
            student_id: Some(student_id.to_string()),
            tuition_id: Some(tuition_id.to_string()),
            month: Some(month.to_string()),
            year,
            amount: Some(amount),
        };
        let resp = self
            .http
            .post(self.url(&["api", "v1", "payment", "create"])?)
            .json(&req)
            .send()
            .await?;
        Self::unwrap_data(resp).await
    }

    /// Lists ids of students who paid a tuition for a month.
    ///
    /// The server defaults `year` to its current year.
    pub async fn list_paying_students(
        &self,
        tuition_id: &str,
        month: Month,
        year: Option<i32>,
    ) -> Result<Vec<String>, ClientError> {
        let url = self.url(&[
            "api",
            "v1",
            "payment",
            "get",
            "all",
            tuition_id,
            month.as_str(),
        ])?;
        let mut req = self.http.get(url);
        if let Some(year) = year {
            req = req.query(&[("year", year)]);
        }
        let resp = req.send().await?;
        let data: StudentIdsResponse = Self::unwrap_data(resp).await?;
        Ok(data.student_ids)
    }

    /// Deletes every payment for a tuition.
    pub async fn delete_by_tuition(&self, tuition_id: &str) -> Result<(), ClientError> {
        self.delete(&["tuition", tuition_id]).await
    }

    /// Deletes every payment made by a student.
    pub async fn delete_by_student(&self, student_id: &str) -> Result<(), ClientError> {
        self.delete(&["student", student_id]).await
    }

    async fn delete(&self, target: &[&str; 2]) -> Result<(), ClientError> {
        let mut segments = vec!["api", "v1", "payment", "delete", "all"];
        segments.extend_from_slice(target);
        let resp = self.http.delete(self.url(&segments)?).send().await?;
        Self::handle_response::<serde_json::Value>(resp).await?;
        Ok(())
    }

    async fn unwrap_data<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        Self::handle_response(resp)
            .await?
            .data
            .ok_or(ClientError::MissingData)
    }

    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<ResponseWrapper<T>, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            let wrapper: ResponseWrapper<T> = serde_json::from_str(&body)?;
            return match wrapper.status {
                ResponseStatus::Success => Ok(wrapper),
                ResponseStatus::Error => Err(ClientError::Api {
                    status_code: wrapper.status_code,
                    message: wrapper.message,
                    data: None,
                }),
            };
        }

        match serde_json::from_str::<ResponseWrapper<serde_json::Value>>(&body) {
            Ok(wrapper) => Err(ClientError::Api {
                status_code: wrapper.status_code,
                message: wrapper.message,
                data: wrapper.data,
            }),
            Err(_) => Err(ClientError::Api {
                status_code: status.as_u16(),
                message: body,
                data: None,
            }),
        }
    }
}
