use super::{GENERIC_ERROR_MESSAGE, SubmissionClient};
use crate::domain::validation::{self, ValidationError};
use crate::domain::{FormFields, SubmissionResult, Variant};
use crate::error::VALIDATION_MESSAGE;

/// Presentation capabilities the controller needs from the page hosting a form.
pub trait FormUi {
    fn disable_control(&self);
    fn enable_control(&self);
    fn show_error(&self, message: &str);
    fn show_success(&self);
    /// Clears the form's inputs; only called after a successful send.
    fn reset_form(&self);
}

/// How a single submit attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected locally; no request was made.
    Invalid(Vec<ValidationError>),
    Sent,
    /// The intake answered with a failure.
    Rejected(SubmissionResult),
    /// The request did not complete or the answer was unreadable.
    Failed,
}

/// Re-enables the submit control when dropped, whatever path the attempt took.
struct ControlGuard<'a, U: FormUi>(&'a U);

impl<'a, U: FormUi> ControlGuard<'a, U> {
    fn disable(ui: &'a U) -> Self {
        ui.disable_control();
        Self(ui)
    }
}

impl<U: FormUi> Drop for ControlGuard<'_, U> {
    fn drop(&mut self) {
        self.0.enable_control();
    }
}

fn failure_text(result: &SubmissionResult) -> String {
    let message = if result.message.trim().is_empty() { GENERIC_ERROR_MESSAGE } else { result.message.as_str() };
    if result.errors.is_empty() { message.to_string() } else { format!("{message}\n{}", result.errors.join("\n")) }
}

/// Drives one form variant: validate, submit, report exactly one outcome to the UI.
#[derive(Debug)]
pub struct FormController<U> {
    client: SubmissionClient,
    variant: Variant,
    ui: U,
}

impl<U: FormUi> FormController<U> {
    pub const fn new(client: SubmissionClient, variant: Variant, ui: U) -> Self {
        Self { client, variant, ui }
    }

    pub const fn ui(&self) -> &U {
        &self.ui
    }

    pub async fn handle_submit(&self, fields: &FormFields) -> SubmitOutcome {
        let errors = validation::validate(fields, self.variant);
        if !errors.is_empty() {
            let listed = validation::messages(&errors).join("\n");
            self.ui.show_error(&format!("{VALIDATION_MESSAGE}\n{listed}"));
            return SubmitOutcome::Invalid(errors);
        }

        let _control = ControlGuard::disable(&self.ui);

        match self.client.submit(fields, self.variant).await {
            Ok(result) if result.success => {
                self.ui.show_success();
                self.ui.reset_form();
                SubmitOutcome::Sent
            }
            Ok(result) => {
                self.ui.show_error(&failure_text(&result));
                SubmitOutcome::Rejected(result)
            }
            Err(e) => {
                tracing::warn!(error = %e, variant = %self.variant, "Form submission failed");
                self.ui.show_error(GENERIC_ERROR_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingUi {
        events: Mutex<Vec<String>>,
    }

    impl RecordingUi {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl FormUi for RecordingUi {
        fn disable_control(&self) {
            self.events.lock().unwrap().push("disable".into());
        }
        fn enable_control(&self) {
            self.events.lock().unwrap().push("enable".into());
        }
        fn show_error(&self, message: &str) {
            self.events.lock().unwrap().push(format!("error: {message}"));
        }
        fn show_success(&self) {
            self.events.lock().unwrap().push("success".into());
        }
        fn reset_form(&self) {
            self.events.lock().unwrap().push("reset".into());
        }
    }

    #[tokio::test]
    async fn test_invalid_form_never_touches_the_network() {
        // Nothing listens on this port; a request would surface as `Failed`.
        let client = SubmissionClient::new("http://127.0.0.1:9").unwrap();
        let controller = FormController::new(client, Variant::Contact, RecordingUi::default());

        let fields = FormFields::new().with("Name", "").with("Email", "bad").with("Message", "hi");
        let outcome = controller.handle_submit(&fields).await;

        assert_eq!(outcome, SubmitOutcome::Invalid(vec![ValidationError::NameRequired, ValidationError::InvalidEmail]));
        assert_eq!(
            controller.ui().events(),
            vec!["error: Please correct the following errors:\nName is required.\nA valid email is required."]
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_shows_generic_message_and_restores_control() {
        let client = SubmissionClient::new("http://127.0.0.1:9").unwrap();
        let controller = FormController::new(client, Variant::Contact, RecordingUi::default());

        let fields = FormFields::new().with("Name", "Ann").with("Email", "ann@x.com").with("Message", "hi");
        let outcome = controller.handle_submit(&fields).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            controller.ui().events(),
            vec!["disable".to_string(), format!("error: {GENERIC_ERROR_MESSAGE}"), "enable".to_string()]
        );
    }

    #[test]
    fn test_failure_text_joins_errors() {
        let result = SubmissionResult::failed("Please correct the following errors:", vec!["Name is required.".into()]);
        assert_eq!(failure_text(&result), "Please correct the following errors:\nName is required.");
        assert_eq!(failure_text(&SubmissionResult::failed("", Vec::new())), GENERIC_ERROR_MESSAGE);
    }
}
