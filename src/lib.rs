#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::email::EmailProvider;
use crate::api::AppState;
use crate::config::Config;
use crate::services::{IntakeService, Notifier};
use std::sync::Arc;
use tokio::sync::watch;

/// Wires the email provider, notifier and intake service into a router.
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    email_provider: Option<Arc<dyn EmailProvider>>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, email_provider: None }
    }

    /// Uses `provider` instead of the one selected by configuration.
    #[must_use]
    pub fn with_email_provider(mut self, provider: Arc<dyn EmailProvider>) -> Self {
        self.email_provider = Some(provider);
        self
    }

    /// Builds the router. Without an explicit provider, the configured one must be complete.
    ///
    /// # Errors
    /// Returns an error if the configuration is incomplete or the provider cannot be constructed.
    pub fn build(self) -> anyhow::Result<axum::Router> {
        let provider = match self.email_provider {
            Some(provider) => provider,
            None => {
                self.config.validate()?;
                adapters::email::from_config(&self.config.provider)?
            }
        };

        let notifier = Notifier::new(provider, self.config.mail.clone());
        let state = AppState { intake_service: IntakeService::new(notifier) };

        Ok(api::app_router(&self.config, state))
    }
}

/// Routes panic messages through `tracing` so they reach the structured log.
pub fn setup_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info.location().map(ToString::to_string).unwrap_or_default();
        tracing::error!(panic = %info, location = %location, "Process panicked");
        default_hook(info);
    }));
}

/// Flips `shutdown_tx` to `true` on Ctrl-C or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to install Ctrl-C handler");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
