//! Network access, behind a trait so the cache can be exercised offline.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::instrument;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Downloads the raw bytes at a URL.
pub trait Fetcher {
    /// Perform a single GET, returning the body of a successful response.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Fetch`] when no response was received, and
    /// [`ErrorKind::HttpStatus`] when the response status is not a success.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP fetcher. One request per call, no retries, no timeout: a
/// stalled mirror stalls the process.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}
impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self { client })
    }
}
impl Fetcher for HttpFetcher {
    #[instrument(skip(self), fields(status, size))]
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().or_raise(|| ErrorKind::Fetch(url.to_string()))?;
        let status = response.status();
        tracing::Span::current().record("status", status.as_u16());
        if !status.is_success() {
            exn::bail!(ErrorKind::HttpStatus { url: url.to_string(), status: status.as_u16() });
        }
        let body = response.bytes().or_raise(|| ErrorKind::Fetch(url.to_string()))?;
        tracing::Span::current().record("size", body.len());
        Ok(body.to_vec())
    }
}
