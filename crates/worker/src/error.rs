//! Errors raised by the poll loop's external collaborators

use homework_core::ResponseError;
use reqwest::StatusCode;
use thiserror::Error;

/// Status API request errors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {endpoint} failed: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API unavailable: HTTP {0}")]
    Unavailable(StatusCode),

    #[error("Failed to decode API response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Notification delivery errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Failed to send Telegram message: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Anything that can abort a poll cycle before the compare step
#[derive(Error, Debug)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Response(#[from] ResponseError),
}
