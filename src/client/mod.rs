//! Browser-side half of the intake flow: submits form fields to the intake
//! routes and drives a [`FormUi`] through one submission attempt.

use crate::domain::{FormFields, SubmissionResult, Variant};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub mod form;

pub use form::{FormController, FormUi, SubmitOutcome};

/// Shown to the user whenever the real cause must stay internal.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Malformed response body: {0}")]
    MalformedBody(String),
    #[error("Invalid endpoint: {0}")]
    Endpoint(String),
}

#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SubmissionClient {
    /// Client that relies on the transport's default timeouts.
    ///
    /// # Errors
    /// Returns `TransportError::Endpoint` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::build(base_url, reqwest::Client::builder())
    }

    /// Client that gives up on a submission after `timeout`.
    ///
    /// # Errors
    /// Returns `TransportError::Endpoint` if `base_url` is not an absolute URL.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        Self::build(base_url, reqwest::Client::builder().timeout(timeout))
    }

    fn build(base_url: &str, builder: reqwest::ClientBuilder) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url).map_err(|e| TransportError::Endpoint(format!("{base_url}: {e}")))?;
        Ok(Self { http: builder.build()?, base_url })
    }

    /// # Errors
    /// Returns `TransportError::Endpoint` if the variant path cannot be joined onto the base URL.
    pub fn endpoint(&self, variant: Variant) -> Result<Url, TransportError> {
        self.base_url.join(variant.endpoint_path()).map_err(|e| TransportError::Endpoint(e.to_string()))
    }

    /// POSTs `fields` unchanged as a JSON object to the route for `variant`.
    ///
    /// Exactly one request is made. A non-2xx answer is a failed `SubmissionResult`,
    /// not an error.
    ///
    /// # Errors
    /// Returns `TransportError` if the request cannot be completed or a 2xx body is not valid JSON.
    #[tracing::instrument(skip_all, fields(variant = %variant))]
    pub async fn submit(&self, fields: &FormFields, variant: Variant) -> Result<SubmissionResult, TransportError> {
        let url = self.endpoint(variant)?;
        let response = self.http.post(url).json(fields).send().await?;

        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(status = status.as_u16(), body_len = body.len(), "Intake responded");

        interpret_response(status, &body)
    }
}

fn string_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

fn error_list(body: &Value) -> Vec<String> {
    body.get("errors")
        .and_then(Value::as_array)
        .map(|errors| errors.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

/// Maps an intake response onto a `SubmissionResult`.
///
/// # Errors
/// Returns `TransportError::MalformedBody` if a 2xx body is not a JSON object.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<SubmissionResult, TransportError> {
    if status.is_success() {
        let value: Value = serde_json::from_slice(body).map_err(|e| TransportError::MalformedBody(e.to_string()))?;
        if !value.is_object() {
            return Err(TransportError::MalformedBody("expected a JSON object".to_string()));
        }

        let message = string_field(&value, "message").unwrap_or_default().to_string();
        return Ok(match value.get("success").and_then(Value::as_bool) {
            Some(false) => SubmissionResult::failed(message, error_list(&value)),
            _ => SubmissionResult::succeeded(message),
        });
    }

    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return Ok(SubmissionResult::failed(GENERIC_ERROR_MESSAGE, Vec::new()));
    };

    let message = string_field(&value, "message").or_else(|| string_field(&value, "error")).unwrap_or(GENERIC_ERROR_MESSAGE);
    Ok(SubmissionResult::failed(message, error_list(&value)))
}
