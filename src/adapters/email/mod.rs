use crate::config::{ProviderConfig, ProviderKind};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub mod log;
pub mod resend;
pub mod smtp;

pub use self::log::LogEmailProvider;
pub use self::resend::ResendProvider;
pub use self::smtp::SmtpProvider;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// A fully rendered email ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Sender mailbox, `Display Name <address>`.
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[async_trait]
pub trait EmailProvider: Send + Sync + std::fmt::Debug {
    /// Hands one email to the provider.
    ///
    /// # Errors
    /// Returns `ProviderError` carrying the provider's own message when it refuses or fails to send.
    async fn send(&self, email: &OutboundEmail) -> Result<(), ProviderError>;
}

/// Builds the provider selected by configuration.
///
/// # Errors
/// Returns an error if the provider's client cannot be constructed.
pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Arc<dyn EmailProvider>> {
    let provider: Arc<dyn EmailProvider> = match config.kind {
        ProviderKind::Resend => Arc::new(ResendProvider::new(config)?),
        ProviderKind::Smtp => Arc::new(SmtpProvider::new(config)?),
        ProviderKind::Log => {
            tracing::warn!("Log email provider selected, notifications will not be delivered");
            Arc::new(LogEmailProvider)
        }
    };

    tracing::info!(provider = config.kind.as_str(), "Email provider initialized");
    Ok(provider)
}
