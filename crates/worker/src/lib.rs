//! Homework Worker - Homework status poller
//!
//! Polls the homework status API and relays review verdict changes to a
//! Telegram chat.

mod config;
pub mod error;
mod notifier;
mod poller;
mod practicum;

pub use config::{Config, ENDPOINT, RETRY_PERIOD};
pub use error::{CycleError, FetchError, NotifyError};
pub use notifier::{Notifier, TelegramNotifier};
pub use poller::{CycleOutcome, Poller};
pub use practicum::{PracticumClient, StatusSource};

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Run the poller service
///
/// Runs one cycle, then sleeps the retry period, forever. The sleep happens
/// whatever the cycle's outcome. Cycle failures are logged, never returned:
/// the loop only ends when `shutdown` is cancelled.
///
/// # Arguments
/// * `source` - Homework status API client
/// * `notifier` - Destination for status messages
/// * `config` - Poller configuration
/// * `shutdown` - Optional cancellation token for graceful shutdown
pub async fn run_worker<S, N>(
    source: S,
    notifier: N,
    config: Config,
    shutdown: Option<CancellationToken>,
) -> Result<()>
where
    S: StatusSource,
    N: Notifier,
{
    info!(
        "Starting poller: endpoint={}, retry_period={}s, from_date={}, notify_on_errors={}",
        config.endpoint,
        config.retry_period_secs,
        config.initial_from_date,
        config.notify_on_errors
    );

    let retry_period = config.retry_period();
    let mut poller = Poller::new(source, notifier, &config);

    loop {
        // Check for shutdown signal
        if let Some(ref token) = shutdown
            && token.is_cancelled()
        {
            info!("Poller received shutdown signal");
            break;
        }

        let outcome = poller.run_cycle().await;
        debug!(
            "Cycle finished: {:?}, next from_date={}",
            outcome,
            poller.cursor()
        );

        match shutdown {
            Some(ref token) => {
                tokio::select! {
                    () = tokio::time::sleep(retry_period) => {}
                    () = token.cancelled() => {
                        info!("Poller received shutdown signal");
                        break;
                    }
                }
            }
            None => tokio::time::sleep(retry_period).await,
        }
    }

    Ok(())
}
