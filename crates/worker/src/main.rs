//! Homework status bot binary
//!
//! Polls the homework status API and forwards verdict changes to Telegram.

use anyhow::{Context, Result};
use homework_shared::LoggingConfig;
use homework_worker::{Config, PracticumClient, TelegramNotifier};
use teloxide::Bot;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    homework_shared::init_env();

    // The guard must be kept alive for the duration of the program to ensure logs are flushed
    let logging = LoggingConfig::from_env(env!("CARGO_PKG_NAME"))?;
    let _guard = homework_shared::init_tracing(&logging)?;

    info!("Starting homework status bot");

    // Missing secrets stop the process here, before any request is made
    let config = Config::from_env().context("Configuration is incomplete")?;

    let source = PracticumClient::new(&config.endpoint, config.practicum_token.clone())
        .context("PRACTICUM_ENDPOINT is not a valid URL")?;
    let notifier = TelegramNotifier::new(Bot::new(&config.telegram_token), &config.telegram_chat_id);
    info!("Telegram bot initialized");

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_shutdown(shutdown.clone()));

    homework_worker::run_worker(source, notifier, config, Some(shutdown)).await?;

    info!("Homework status bot stopped");
    Ok(())
}

async fn wait_for_shutdown(shutdown: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
    shutdown.cancel();
}
