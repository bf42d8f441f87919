//! Poll-compare-notify cycle
//!
//! One cycle fetches the status response, derives the report for the most
//! recent homework and sends it only when it differs from the last report
//! that was delivered. A cycle never returns an error: failures are logged
//! and the next cycle starts from the same cursor.

use chrono::Utc;
use homework_core::homework::{NO_NEW_STATUSES, failure_message};
use homework_core::{check_response, current_date, next_cursor, parse_status};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::CycleError;
use crate::notifier::Notifier;
use crate::practicum::StatusSource;

/// What a single cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new report was delivered
    Notified,
    /// The report matched the last delivered one
    Unchanged,
    /// The response listed no homeworks
    NoHomeworks,
    /// A new report could not be delivered; it is retried next cycle
    DeliveryFailed,
    /// Fetching or validating the response failed
    Failed,
}

pub struct Poller<S, N> {
    source: S,
    notifier: N,
    retry_period_secs: u64,
    notify_on_errors: bool,
    cursor: i64,
    last_report: Option<String>,
}

impl<S: StatusSource, N: Notifier> Poller<S, N> {
    pub fn new(source: S, notifier: N, config: &Config) -> Self {
        Self {
            source,
            notifier,
            retry_period_secs: config.retry_period_secs,
            notify_on_errors: config.notify_on_errors,
            cursor: config.initial_from_date,
            last_report: None,
        }
    }

    /// `from_date` of the next request
    pub const fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Last report that reached the chat
    pub fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }

    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run one fetch, validate, compare and notify pass
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll().await {
            Ok((Some(report), server_date)) => self.handle_report(report, server_date).await,
            Ok((None, server_date)) => {
                debug!("{}", NO_NEW_STATUSES);
                if let Some(date) = server_date {
                    self.advance_cursor(Some(date));
                }
                CycleOutcome::NoHomeworks
            }
            Err(err) => self.handle_failure(&err).await,
        }
    }

    async fn poll(&self) -> Result<(Option<String>, Option<i64>), CycleError> {
        let response = self.source.fetch(self.cursor).await?;
        let homeworks = check_response(&response)?;
        let report = homeworks.first().map(parse_status).transpose()?;

        Ok((report, current_date(&response)))
    }

    async fn handle_report(&mut self, report: String, server_date: Option<i64>) -> CycleOutcome {
        if self.last_report.as_deref() == Some(report.as_str()) {
            debug!("Status unchanged, nothing to send");
            self.advance_cursor(server_date);
            return CycleOutcome::Unchanged;
        }

        match self.notifier.send(&report).await {
            Ok(()) => {
                info!("Status change delivered: {}", report);
                self.last_report = Some(report);
                self.advance_cursor(server_date);
                CycleOutcome::Notified
            }
            Err(e) => {
                error!("Failed to deliver status change: {}", e);
                CycleOutcome::DeliveryFailed
            }
        }
    }

    async fn handle_failure(&mut self, err: &CycleError) -> CycleOutcome {
        let message = failure_message(err);
        error!("{}", message);

        if self.notify_on_errors && self.last_report.as_deref() != Some(message.as_str()) {
            match self.notifier.send(&message).await {
                Ok(()) => self.last_report = Some(message),
                Err(e) => error!("Failed to deliver failure report: {}", e),
            }
        }

        CycleOutcome::Failed
    }

    fn advance_cursor(&mut self, server_date: Option<i64>) {
        let next = next_cursor(server_date, Utc::now().timestamp(), self.retry_period_secs);
        if next != self.cursor {
            debug!("Cursor moved from {} to {}", self.cursor, next);
        }
        self.cursor = next;
    }
}
