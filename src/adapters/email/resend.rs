use super::{EmailProvider, OutboundEmail, ProviderError};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Delivers email through the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ResendProvider {
    /// # Errors
    /// Returns an error if the API key is missing or the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> anyhow::Result<Self> {
        let api_key = config
            .resend_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("RESEND_API_KEY is not set"))?;

        let client = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self { client, endpoint: format!("{}/emails", config.resend_base_url.trim_end_matches('/')), api_key })
    }
}

#[async_trait]
impl EmailProvider for ResendProvider {
    #[tracing::instrument(skip_all, fields(subject = %email.subject), err(Display))]
    async fn send(&self, email: &OutboundEmail) -> Result<(), ProviderError> {
        let request = SendEmailRequest {
            from: &email.from,
            to: [&email.to],
            reply_to: email.reply_to.as_deref(),
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let response = self.client.post(&self.endpoint).bearer_auth(&self.api_key).json(&request).send().await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "Resend accepted email");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("Resend responded with status {status}"));

        Err(ProviderError::Rejected { status: status.as_u16(), message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;

    fn provider_config(api_key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            kind: ProviderKind::Resend,
            timeout_secs: 5,
            resend_api_key: api_key.map(str::to_string),
            resend_base_url: "https://api.resend.com/".to_string(),
            smtp_host: None,
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        assert!(ResendProvider::new(&provider_config(None)).is_err());
        assert!(ResendProvider::new(&provider_config(Some(" "))).is_err());
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let provider = ResendProvider::new(&provider_config(Some("re_test"))).unwrap();
        assert_eq!(provider.endpoint, "https://api.resend.com/emails");
    }

    #[test]
    fn test_request_serialization_omits_missing_reply_to() {
        let request = SendEmailRequest {
            from: "UBS Contact Form <onboarding@resend.dev>",
            to: ["sales@ubique-bs.com"],
            reply_to: None,
            subject: "New Contact Form Submission",
            html: "<p>hi</p>",
            text: "hi",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["to"], serde_json::json!(["sales@ubique-bs.com"]));
        assert!(value.get("reply_to").is_none());
    }
}
