use super::{EmailProvider, OutboundEmail, ProviderError};
use async_trait::async_trait;

#[derive(Debug, Default)]
pub struct LogEmailProvider;

#[async_trait]
impl EmailProvider for LogEmailProvider {
    async fn send(&self, email: &OutboundEmail) -> Result<(), ProviderError> {
        tracing::info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            body = %email.text,
            "LOG: Email not delivered"
        );
        Ok(())
    }
}
