use crate::adapters::email::{EmailProvider, OutboundEmail, ProviderError};
use crate::config::MailConfig;
use crate::domain::{ContactSubmission, DemoSubmission, Submission, Variant};
use askama::Template;
use std::sync::Arc;
use thiserror::Error;

pub const USERS_PLACEHOLDER: &str = "Not specified";
pub const MESSAGE_PLACEHOLDER: &str = "None provided";

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Failed to render notification: {0}")]
    Render(#[from] askama::Error),
}

#[derive(Template)]
#[template(path = "emails/contact.html")]
struct ContactHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/contact.txt")]
struct ContactTextTemplate<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/demo.html")]
struct DemoHtmlTemplate<'a> {
    name: &'a str,
    company: &'a str,
    email: &'a str,
    users: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/demo.txt")]
struct DemoTextTemplate<'a> {
    name: &'a str,
    company: &'a str,
    email: &'a str,
    users: &'a str,
    message: &'a str,
}

fn render_contact(c: &ContactSubmission) -> askama::Result<(String, String)> {
    let html = ContactHtmlTemplate { name: &c.name, email: &c.email, message: &c.message }.render()?;
    let text = ContactTextTemplate { name: &c.name, email: &c.email, message: &c.message }.render()?;
    Ok((html, text))
}

fn render_demo(d: &DemoSubmission) -> askama::Result<(String, String)> {
    let users = d.number_of_users.as_deref().unwrap_or(USERS_PLACEHOLDER);
    let message = d.additional_message.as_deref().unwrap_or(MESSAGE_PLACEHOLDER);

    let html = DemoHtmlTemplate { name: &d.name, company: &d.company_name, email: &d.email, users, message }.render()?;
    let text = DemoTextTemplate { name: &d.name, company: &d.company_name, email: &d.email, users, message }.render()?;
    Ok((html, text))
}

/// Turns accepted submissions into notification emails and hands them to the provider.
#[derive(Clone, Debug)]
pub struct Notifier {
    provider: Arc<dyn EmailProvider>,
    mail: MailConfig,
}

impl Notifier {
    #[must_use]
    pub fn new(provider: Arc<dyn EmailProvider>, mail: MailConfig) -> Self {
        Self { provider, mail }
    }

    fn from_mailbox(&self, variant: Variant) -> String {
        let name = match variant {
            Variant::Contact => &self.mail.contact_from_name,
            Variant::Demo => &self.mail.demo_from_name,
        };
        format!("{name} <{}>", self.mail.from_address)
    }

    /// Renders the notification for `submission` without sending it.
    ///
    /// # Errors
    /// Returns `NotifierError::Render` if a template fails to render.
    pub fn compose(&self, submission: &Submission) -> Result<OutboundEmail, NotifierError> {
        let variant = submission.variant();
        let (html, text) = match submission {
            Submission::Contact(c) => render_contact(c)?,
            Submission::Demo(d) => render_demo(d)?,
        };

        // The form's email check is looser than RFC 5322; only usable addresses become Reply-To.
        let reply_to = match submission.email().parse::<lettre::Address>() {
            Ok(address) => Some(address.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Submitter email is not a deliverable address, omitting Reply-To");
                None
            }
        };

        Ok(OutboundEmail {
            from: self.from_mailbox(variant),
            to: self.mail.recipient.clone(),
            reply_to,
            subject: variant.subject().to_string(),
            html,
            text,
        })
    }

    /// Sends exactly one notification. Failures are terminal; nothing is retried.
    ///
    /// # Errors
    /// Returns `NotifierError` carrying the provider's message if delivery fails.
    #[tracing::instrument(skip_all, fields(variant = %submission.variant()))]
    pub async fn send(&self, submission: &Submission) -> Result<(), NotifierError> {
        let email = self.compose(submission)?;
        self.provider.send(&email).await?;
        tracing::info!(subject = %email.subject, "Notification sent");
        Ok(())
    }
}
