//! HTTP client for the MoBase catalog using wreq for TLS fingerprint
//! emulation, plus the fetch error taxonomy the pipeline encodes into
//! the record.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Path prefix for German-locale product pages.
const PRODUCT_PATH: &str = "/de/p/";

/// Fetch failures, phrased the way they end up in the record status.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Produkt nicht gefunden (404)")]
    NotFound,

    #[error("HTTP-Fehler: {0}")]
    HttpStatus(u16),

    #[error("Fehler: {0}")]
    Transport(String),
}

impl FetchError {
    /// Status string for the record.
    pub fn status_text(&self) -> String {
        self.to_string()
    }

    /// Error class for the record, only set for transport failures.
    pub fn error_type(&self) -> Option<&'static str> {
        match self {
            FetchError::Transport(_) => Some("TransportError"),
            _ => None,
        }
    }
}

/// Trait for product page fetching - enables mocking for tests.
#[async_trait]
pub trait ProductFetch: Send + Sync {
    /// Fetches the rendered product page HTML for an article number.
    async fn product_page(&self, article: &str) -> Result<String, FetchError>;

    /// Returns the catalog URL for an article number.
    fn product_url(&self, article: &str) -> String;
}

/// MoBase HTTP client with browser impersonation and polite delays.
pub struct MobaseClient {
    client: Client,
    base_url: String,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl MobaseClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None)
    }

    /// Creates a client with an optional custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(45))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or_else(|| config.base_url.clone()),
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// Performs a GET request and maps HTTP failures to the taxonomy.
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        self.delay().await;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8")
            .header("Accept-Language", "de-DE,de;q=0.9,en;q=0.8")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        debug!("Response status: {}", status);

        match status {
            404 => return Err(FetchError::NotFound),
            200..=299 => {}
            code => {
                warn!("Catalog returned HTTP {}", code);
                return Err(FetchError::HttpStatus(code));
            }
        }

        response.text().await.map_err(|e| FetchError::Transport(e.to_string()))
    }

    /// Adds a random delay to mimic human behavior.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl ProductFetch for MobaseClient {
    async fn product_page(&self, article: &str) -> Result<String, FetchError> {
        let url = self.product_url(article);

        info!("Fetching product page: {}", article);
        self.get(&url).await
    }

    fn product_url(&self, article: &str) -> String {
        format!("{}{}{}", self.base_url.trim_end_matches('/'), PRODUCT_PATH, article)
    }
}
