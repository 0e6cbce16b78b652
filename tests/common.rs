#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc, unreachable_pub, missing_debug_implementations)]

use async_trait::async_trait;
use clap::Parser;
use form_intake::AppBuilder;
use form_intake::adapters::email::{EmailProvider, OutboundEmail, ProviderError};
use form_intake::config::Config;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("form_intake=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

pub fn get_test_config() -> Config {
    Config::try_parse_from(["form-intake", "--host", "127.0.0.1", "--port", "0", "--provider", "log"]).unwrap()
}

/// Captures every email instead of sending it, optionally failing each attempt.
#[derive(Debug, Default)]
pub struct RecordingProvider {
    sent: Mutex<Vec<OutboundEmail>>,
    attempts: AtomicUsize,
    fail_with: Option<String>,
}

impl RecordingProvider {
    pub fn failing(message: &str) -> Self {
        Self { fail_with: Some(message.to_string()), ..Self::default() }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailProvider for RecordingProvider {
    async fn send(&self, email: &OutboundEmail) -> Result<(), ProviderError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            return Err(ProviderError::Rejected { status: 403, message: message.clone() });
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub server_url: String,
    pub client: reqwest::Client,
    pub provider: Arc<RecordingProvider>,
    pub config: Config,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(get_test_config(), RecordingProvider::default()).await
    }

    pub async fn spawn_with_provider(provider: RecordingProvider) -> Self {
        Self::spawn_with(get_test_config(), provider).await
    }

    pub async fn spawn_with(config: Config, provider: RecordingProvider) -> Self {
        setup_tracing();

        let provider = Arc::new(provider);
        let router = AppBuilder::new(config.clone())
            .with_email_provider(Arc::clone(&provider) as Arc<dyn EmailProvider>)
            .build()
            .unwrap();

        let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port)).await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { server_url: format!("http://{addr}"), client: reqwest::Client::new(), provider, config }
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client.post(format!("{}{}", self.server_url, path)).json(body).send().await.unwrap()
    }
}
