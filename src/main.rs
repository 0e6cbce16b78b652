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

use form_intake::config::Config;
use form_intake::{AppBuilder, telemetry};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::watch;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    form_intake::setup_panic_hook();

    let boot_span = tracing::info_span!("boot_server");
    let (listener, app_router) = async {
        // Missing provider credentials are fatal: never accept traffic we cannot deliver.
        let app_router = AppBuilder::new(config.clone())
            .build()
            .inspect_err(|e| tracing::error!(error = %e, "Invalid configuration"))?;

        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!(address = %addr, "listening");
        tracing::info!(origins = ?config.cors.allowed_origins, "CORS enabled");

        Ok::<(tokio::net::TcpListener, axum::Router), anyhow::Error>((listener, app_router))
    }
    .instrument(boot_span)
    .await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    form_intake::spawn_signal_handler(shutdown_tx);

    let mut server_rx = shutdown_rx.clone();
    let server = axum::serve(listener, app_router).with_graceful_shutdown(async move {
        let _ = server_rx.wait_for(|&s| s).await;
    }).into_future();

    let mut drain_rx = shutdown_rx;
    let drain_deadline = async move {
        let _ = drain_rx.wait_for(|&s| s).await;
        tokio::time::sleep(Duration::from_secs(config.server.shutdown_timeout_secs)).await;
    };

    tokio::select! {
        res = server => {
            if let Err(e) = res {
                tracing::error!(error = %e, "Server error");
            }
        }
        () = drain_deadline => {
            tracing::warn!("Timeout waiting for in-flight requests to finish.");
        }
    }

    telemetry_guard.shutdown();
    Ok(())
}
