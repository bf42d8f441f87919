//! Homework status API client

use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

/// Source of homework status responses
pub trait StatusSource {
    /// Fetch statuses changed since `from_date` (Unix seconds)
    fn fetch(&self, from_date: i64) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Authenticated client for the homework status endpoint
#[derive(Clone)]
pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self, FetchError> {
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: Url::parse(endpoint)?,
            token: token.into(),
        })
    }

    fn request_url(&self, from_date: i64) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("from_date", &from_date.to_string());
        url
    }
}

impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError> {
        let url = self.request_url(from_date);
        debug!("Requesting {} with from_date={}", self.endpoint, from_date);

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .send()
            .await
            .map_err(|source| FetchError::Connection {
                endpoint: self.endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Unavailable(status));
        }

        response.json::<Value>().await.map_err(FetchError::Decode)
    }
}
