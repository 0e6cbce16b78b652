use crate::domain::{FormFields, Submission, ValidationError, Variant};
use crate::services::notifier::{Notifier, NotifierError};
use opentelemetry::{KeyValue, global, metrics::Counter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Submission failed validation")]
    Invalid(Vec<ValidationError>),
    #[error(transparent)]
    Notifier(#[from] NotifierError),
}

#[derive(Clone, Debug)]
pub struct Metrics {
    pub submissions: Counter<u64>,
}

impl Metrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter("form-intake");
        Self {
            submissions: meter
                .u64_counter("intake_submissions_total")
                .with_description("Form submissions received, by variant and outcome")
                .build(),
        }
    }

    fn record(&self, variant: Variant, outcome: &'static str) {
        self.submissions
            .add(1, &[KeyValue::new("variant", variant.as_str()), KeyValue::new("outcome", outcome)]);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Server side of the intake flow: re-validates every submission before notifying.
#[derive(Clone, Debug)]
pub struct IntakeService {
    notifier: Notifier,
    metrics: Metrics,
}

impl IntakeService {
    #[must_use]
    pub fn new(notifier: Notifier) -> Self {
        Self { notifier, metrics: Metrics::new() }
    }

    /// Validates `fields` as `variant` and sends one notification for them.
    ///
    /// # Errors
    /// Returns `IntakeError::Invalid` without contacting the provider when validation fails.
    /// Returns `IntakeError::Notifier` if the provider refuses or fails to send.
    #[tracing::instrument(skip_all, fields(variant = %variant))]
    pub async fn submit(&self, variant: Variant, fields: &FormFields) -> Result<(), IntakeError> {
        let submission = match Submission::parse(variant, fields) {
            Ok(submission) => submission,
            Err(errors) => {
                tracing::debug!(error_count = errors.len(), "Submission rejected by validation");
                self.metrics.record(variant, "invalid");
                return Err(IntakeError::Invalid(errors));
            }
        };

        match self.notifier.send(&submission).await {
            Ok(()) => {
                self.metrics.record(variant, "sent");
                Ok(())
            }
            Err(e) => {
                self.metrics.record(variant, "failed");
                Err(e.into())
            }
        }
    }
}
