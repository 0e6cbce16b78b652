use crate::api::schemas::intake::{DeliveryFailureResponse, ValidationFailureResponse};
use crate::domain::ValidationError;
use crate::domain::validation::messages;
use crate::services::{IntakeError, NotifierError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please correct the following errors:";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<ValidationError>),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Notification failed: {0}")]
    Notifier(#[from] NotifierError),
    #[error("Internal server error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<IntakeError> for AppError {
    fn from(e: IntakeError) -> Self {
        match e {
            IntakeError::Invalid(errors) => Self::Validation(errors),
            IntakeError::Notifier(e) => Self::Notifier(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                tracing::debug!(errors = ?errors, "Validation failed");
                let body = ValidationFailureResponse::new(VALIDATION_MESSAGE, messages(&errors));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::BadRequest(msg) => {
                tracing::debug!(message = %msg, "Bad request");
                let body = ValidationFailureResponse::new(INVALID_BODY_MESSAGE, vec![msg]);
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::Notifier(e) => {
                tracing::error!(error = %e, "Email delivery failed");
                let body = DeliveryFailureResponse { error: "Failed to send email".to_string(), details: e.to_string() };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            Self::Internal => {
                tracing::error!("Internal server error occurred");
                let body =
                    DeliveryFailureResponse { error: "Internal server error".to_string(), details: String::new() };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
