// src/core/net.rs
//
// Page retrieval seam. The enricher only ever sees `PageFetcher`; which
// backend sits behind it (browser session, plain HTTP, canned pages in tests)
// is decided by the runner.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::consts::{HTTP_TIMEOUT_MS, USER_AGENT};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to start browser session: {0}")]
    Launch(String),
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
    #[error("timed out fetching {url}")]
    Timeout { url: String },
    #[error("HTTP {code} from {url}")]
    Status { url: String, code: u16 },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("session already closed")]
    Closed,
}

/// One fetch at a time: implementations own mutable session state
/// (current page, cookies), hence `&mut self`.
pub trait PageFetcher {
    /// Full markup of `url` once rendering has settled.
    fn fetch(&mut self, url: &str) -> Result<String, FetchError>;

    /// Release the session. Must be idempotent.
    fn close(&mut self) -> Result<(), FetchError> {
        Ok(())
    }
}

/// Plain GET, no JavaScript. Good enough for server-rendered sources.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(HTTP_TIMEOUT_MS))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout { url: s!(url) }
            } else {
                FetchError::Http(e)
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), code: status.as_u16() });
        }
        Ok(resp.text()?)
    }
}
