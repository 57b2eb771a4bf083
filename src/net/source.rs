//! src/net/source.rs
//!
//! Where samples come from. The poller only sees [`MetricsSource`]; the HTTP
//! implementation talks to the observed process's `/stats` endpoint.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{FetchError, FetchResult};
use crate::sample::Sample;

/// Produces one sample per call.
pub trait MetricsSource {
    fn fetch(&mut self) -> FetchResult<Sample>;

    /// Human-readable origin, shown in the title bar.
    fn describe(&self) -> String;
}

/// Blocking HTTP source for `GET <url>`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    /// `timeout` bounds a whole request; the poller passes its interval.
    pub fn new(url: impl Into<String>, timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("qps-monitor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self::with_client(url, client))
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

impl MetricsSource for HttpSource {
    fn fetch(&mut self) -> FetchResult<Sample> {
        let response = self.client.get(&self.url).send().map_err(|e| {
            if e.is_timeout() {
                FetchError::Transport(format!("timeout after waiting on {}", self.url))
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("HTTP {} from {}", status, self.url)));
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Sample::from_json(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
