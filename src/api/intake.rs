use crate::api::AppState;
use crate::api::schemas::intake::AcceptedResponse;
use crate::domain::{FormFields, Variant};
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};

/// Accepts a contact form submission (`Name`, `Email`, `Message`).
///
/// # Errors
/// Returns `AppError::Validation` if the fields fail validation.
/// Returns `AppError::Notifier` if the notification could not be delivered.
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FormFields>, JsonRejection>,
) -> Result<impl IntoResponse> {
    submit(&state, Variant::Contact, payload).await
}

/// Accepts a demo request (`req-Name-2`, `req-Email-2`, `req-Company-Name-2`,
/// optional `Number-of-users-2` and `req-Message-2`).
///
/// # Errors
/// Returns `AppError::Validation` if the fields fail validation.
/// Returns `AppError::Notifier` if the notification could not be delivered.
pub async fn submit_demo(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FormFields>, JsonRejection>,
) -> Result<impl IntoResponse> {
    submit(&state, Variant::Demo, payload).await
}

async fn submit(
    state: &AppState,
    variant: Variant,
    payload: std::result::Result<Json<FormFields>, JsonRejection>,
) -> Result<Json<AcceptedResponse>> {
    let Json(fields) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    tracing::info!(variant = %variant, field_count = fields.len(), "Form submission received");

    state.intake_service.submit(variant, &fields).await?;

    Ok(Json(AcceptedResponse::new()))
}
