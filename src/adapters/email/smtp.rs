use super::{EmailProvider, OutboundEmail, ProviderError};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use lettre::{
    Message, SmtpTransport, Transport, message::MultiPart, transport::smtp::authentication::Credentials,
};
use std::time::Duration;

/// Delivers email through an SMTP relay.
#[derive(Clone)]
pub struct SmtpProvider {
    mailer: SmtpTransport,
    host: String,
}

impl std::fmt::Debug for SmtpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpProvider").field("host", &self.host).finish_non_exhaustive()
    }
}

impl SmtpProvider {
    /// # Errors
    /// Returns an error if no host is configured or the relay cannot be set up.
    pub fn new(config: &ProviderConfig) -> anyhow::Result<Self> {
        let host = config
            .smtp_host
            .clone()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("INTAKE_SMTP_HOST is not set"))?;
        let timeout = Some(Duration::from_secs(config.timeout_secs));

        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(smtp_host = %host, smtp_port = config.smtp_port, "SMTP credentials not configured, using unauthenticated connection");
            SmtpTransport::builder_dangerous(&host).port(config.smtp_port).timeout(timeout).build()
        } else {
            tracing::info!(smtp_host = %host, smtp_port = config.smtp_port, "SMTP relay initialized with authentication and TLS");
            let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            SmtpTransport::relay(&host)?.port(config.smtp_port).credentials(creds).timeout(timeout).build()
        };

        Ok(Self { mailer, host })
    }
}

fn invalid(e: impl std::fmt::Display) -> ProviderError {
    ProviderError::InvalidMessage(e.to_string())
}

pub(crate) fn build_message(email: &OutboundEmail) -> Result<Message, ProviderError> {
    let mut builder = Message::builder()
        .from(email.from.parse().map_err(invalid)?)
        .to(email.to.parse().map_err(invalid)?)
        .subject(email.subject.as_str());

    if let Some(reply_to) = &email.reply_to {
        builder = builder.reply_to(reply_to.parse().map_err(invalid)?);
    }

    builder
        .multipart(MultiPart::alternative_plain_html(email.text.clone(), email.html.clone()))
        .map_err(invalid)
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    #[tracing::instrument(skip_all, fields(smtp_host = %self.host, subject = %email.subject), err(Display))]
    async fn send(&self, email: &OutboundEmail) -> Result<(), ProviderError> {
        let message = build_message(email)?;
        let mailer = self.mailer.clone();

        tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .map_err(|e| ProviderError::Other(anyhow::anyhow!("SMTP task failed: {e}")))?
            .map_err(|e| ProviderError::Other(anyhow::anyhow!("SMTP error: {e}")))?;

        Ok(())
    }
}
