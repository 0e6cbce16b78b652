use clap::{Args, Parser, ValueEnum};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing provider credential: {0} must be set for the {1} provider")]
    MissingCredential(&'static str, &'static str),
    #[error("Invalid mail address in {0}: {1}")]
    InvalidAddress(&'static str, String),
    #[error("Wildcard origin is not allowed in INTAKE_ALLOWED_ORIGINS when credentials are permitted")]
    WildcardOrigin,
}

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub cors: CorsConfig,

    #[command(flatten)]
    pub mail: MailConfig,

    #[command(flatten)]
    pub provider: ProviderConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "INTAKE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Maximum accepted request body size in bytes
    #[arg(long, env = "INTAKE_MAX_BODY_BYTES", default_value_t = 65_536)]
    pub max_body_bytes: usize,

    /// How long to wait for in-flight requests during shutdown
    #[arg(long, env = "INTAKE_SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct CorsConfig {
    /// Comma-separated list of origins allowed to submit forms
    #[arg(
        long = "allowed-origins",
        env = "INTAKE_ALLOWED_ORIGINS",
        default_value = "https://ubique-bs.com,http://localhost:8080",
        value_delimiter = ','
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct MailConfig {
    /// Address that receives every notification
    #[arg(long = "mail-recipient", env = "INTAKE_MAIL_RECIPIENT", default_value = "sales@ubique-bs.com")]
    pub recipient: String,

    /// Sender address used for notifications
    #[arg(long = "mail-from-address", env = "INTAKE_MAIL_FROM_ADDRESS", default_value = "onboarding@resend.dev")]
    pub from_address: String,

    /// Display name on contact form notifications
    #[arg(long = "mail-contact-from-name", env = "INTAKE_MAIL_CONTACT_FROM_NAME", default_value = "UBS Contact Form")]
    pub contact_from_name: String,

    /// Display name on demo request notifications
    #[arg(long = "mail-demo-from-name", env = "INTAKE_MAIL_DEMO_FROM_NAME", default_value = "UBS Demo Request")]
    pub demo_from_name: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    #[default]
    Resend,
    Smtp,
    Log,
}

impl ProviderKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resend => "resend",
            Self::Smtp => "smtp",
            Self::Log => "log",
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ProviderConfig {
    /// Email provider used to deliver notifications
    #[arg(long = "provider", env = "INTAKE_PROVIDER", value_enum, default_value_t = ProviderKind::Resend)]
    pub kind: ProviderKind,

    /// Timeout for a single provider call
    #[arg(long = "provider-timeout-secs", env = "INTAKE_PROVIDER_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Resend API key
    #[arg(long = "resend-api-key", env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Resend API base URL
    #[arg(long = "resend-base-url", env = "INTAKE_RESEND_BASE_URL", default_value = "https://api.resend.com")]
    pub resend_base_url: String,

    /// SMTP relay host
    #[arg(long = "smtp-host", env = "INTAKE_SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP relay port
    #[arg(long = "smtp-port", env = "INTAKE_SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// SMTP username (leave empty for an unauthenticated local relay)
    #[arg(long = "smtp-username", env = "INTAKE_SMTP_USERNAME", default_value = "")]
    pub smtp_username: String,

    /// SMTP password
    #[arg(long = "smtp-password", env = "INTAKE_SMTP_PASSWORD", default_value = "", hide_env_values = true)]
    pub smtp_password: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long = "log-format", env = "INTAKE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint for traces and metrics (disabled when unset)
    #[arg(long = "otlp-endpoint", env = "INTAKE_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }

    /// Checks that the selected provider has everything it needs to send mail.
    ///
    /// # Errors
    /// Returns `ConfigError` if a credential is missing, an address does not parse, or the origin list has a wildcard.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.provider.kind {
            ProviderKind::Resend => {
                if self.provider.resend_api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
                    return Err(ConfigError::MissingCredential("RESEND_API_KEY", "resend"));
                }
            }
            ProviderKind::Smtp => {
                if self.provider.smtp_host.as_deref().is_none_or(|h| h.trim().is_empty()) {
                    return Err(ConfigError::MissingCredential("INTAKE_SMTP_HOST", "smtp"));
                }
            }
            ProviderKind::Log => {}
        }

        if self.cors.allowed_origins.iter().any(|o| o.trim() == "*") {
            return Err(ConfigError::WildcardOrigin);
        }

        for (field, value) in [("INTAKE_MAIL_RECIPIENT", &self.mail.recipient), ("INTAKE_MAIL_FROM_ADDRESS", &self.mail.from_address)] {
            if value.parse::<lettre::Address>().is_err() {
                return Err(ConfigError::InvalidAddress(field, value.clone()));
            }
        }

        Ok(())
    }
}
