//! HTTP client for fetching random values from the QRNG service
//!
//! One call maps to exactly one GET request. Chunking lives in [`crate::reader`];
//! retries and caching are left to callers.

use crate::{Error, Result};
use reqwest::blocking::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Public endpoint of the ANU quantum random numbers service
pub const ANU_API_URL: &str = "https://qrng.anu.edu.au/API/jsonI.php";

/// Category of random value requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Unsigned 8-bit integers
    Uint8,
    /// Unsigned 16-bit integers
    Uint16,
    /// Hexadecimal strings of `block_size` bytes each
    Hex16,
}

impl ValueKind {
    /// Value of the `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Uint8 => "uint8",
            ValueKind::Uint16 => "uint16",
            ValueKind::Hex16 => "hex16",
        }
    }
}

/// Single-request access to the random number service, one method per kind.
///
/// Implementations perform no validation and no chunking: `length` and
/// `block_size` are passed through as given.
pub trait Fetcher {
    fn fetch_uint8(&self, length: usize) -> Result<Vec<u8>>;

    fn fetch_uint16(&self, length: usize) -> Result<Vec<u16>>;

    fn fetch_hex16(&self, length: usize, block_size: usize) -> Result<Vec<String>>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch_uint8(&self, length: usize) -> Result<Vec<u8>> {
        (**self).fetch_uint8(length)
    }

    fn fetch_uint16(&self, length: usize) -> Result<Vec<u16>> {
        (**self).fetch_uint16(length)
    }

    fn fetch_hex16(&self, length: usize, block_size: usize) -> Result<Vec<String>> {
        (**self).fetch_hex16(length, block_size)
    }
}

/// Configuration for the HTTP fetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Endpoint of the JSON API
    pub base_url: Url,
    /// Request timeout, `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl FetcherConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Body returned by the JSON API
#[derive(Debug, Deserialize)]
struct Payload<T> {
    #[serde(default)]
    data: Vec<T>,
    #[serde(default)]
    success: Option<bool>,
}

/// Blocking HTTP fetcher for the JSON API
pub struct HttpFetcher {
    client: Client,
    config: FetcherConfig,
}

impl HttpFetcher {
    /// Create a new fetcher with configuration
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Transport)?;

        Ok(Self { client, config })
    }

    /// Issue one request and decode the `data` array
    #[instrument(skip(self))]
    fn request<T: DeserializeOwned + Default>(
        &self,
        kind: ValueKind,
        length: usize,
        block_size: usize,
    ) -> Result<Vec<T>> {
        let url = self.build_request_url(kind, length, block_size);

        debug!("Fetching {} {} values from {}", length, kind.as_str(), url);

        let response = self.client.get(url.clone()).send().map_err(|e| {
            warn!("Failed to fetch from {}: {}", url, e);
            Error::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error {} from {}", status, url);
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(Error::Transport)?;
        let payload: Payload<T> = serde_json::from_slice(&body).map_err(|e| {
            warn!("Malformed response from {}: {}", url, e);
            Error::Decode(e)
        })?;

        if payload.success == Some(false) {
            warn!("Service reported failure for {}", url);
            return Err(Error::ServiceRejected);
        }

        debug!("Received {} values", payload.data.len());
        Ok(payload.data)
    }

    /// Build request URL with `type`, `length` and `size` query parameters
    fn build_request_url(&self, kind: ValueKind, length: usize, block_size: usize) -> Url {
        let mut url = self.config.base_url.clone();

        url.query_pairs_mut()
            .append_pair("type", kind.as_str())
            .append_pair("length", &length.to_string())
            .append_pair("size", &block_size.to_string());

        url
    }

    /// Get fetcher configuration
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_uint8(&self, length: usize) -> Result<Vec<u8>> {
        self.request(ValueKind::Uint8, length, 0)
    }

    fn fetch_uint16(&self, length: usize) -> Result<Vec<u16>> {
        self.request(ValueKind::Uint16, length, 0)
    }

    fn fetch_hex16(&self, length: usize, block_size: usize) -> Result<Vec<String>> {
        self.request(ValueKind::Hex16, length, block_size)
    }
}
