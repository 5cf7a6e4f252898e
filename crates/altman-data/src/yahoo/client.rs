//! Low-level Yahoo Finance HTTP client with rate limiting and crumb handling.

use crate::error::{DataError, Result};
use crate::provider::FetchConfig;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

/// Fundamentals timeseries endpoint; the symbol is appended.
const TIMESERIES_URL: &str =
    "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";

/// Quote endpoint used for the company-info record.
const QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";

/// Visiting this host sets the session cookie the crumb is bound to.
const COOKIE_URL: &str = "https://fc.yahoo.com";

/// Crumb endpoint.
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";

/// Retry hint when Yahoo answers 429 without a `Retry-After` header.
const DEFAULT_RETRY_AFTER_MS: u64 = 5_000;

/// Rate limiter so consecutive requests are spaced out
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// Yahoo Finance HTTP client.
pub struct YahooClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    crumb: Mutex<Option<String>>,
}

impl YahooClient {
    /// Create a client from a fetch configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.rate_limit_delay))),
            crumb: Mutex::new(None),
        })
    }

    /// Fetch raw timeseries JSON for `symbol`.
    ///
    /// `types` are fully prefixed timeseries keys such as `annualTotalAssets`;
    /// `period1`/`period2` are unix timestamps bounding the requested range.
    pub async fn timeseries(
        &self,
        symbol: &str,
        types: &[String],
        period1: i64,
        period2: i64,
    ) -> Result<String> {
        let url = format!("{}/{}", TIMESERIES_URL, symbol);
        let query = [
            ("symbol", symbol.to_string()),
            ("type", types.join(",")),
            ("period1", period1.to_string()),
            ("period2", period2.to_string()),
        ];
        self.get_text(&url, &query).await
    }

    /// Fetch raw quote JSON for `symbol`.
    pub async fn quote(&self, symbol: &str) -> Result<String> {
        let crumb = self.crumb().await?;
        let query = [("symbols", symbol.to_string()), ("crumb", crumb)];
        self.get_text(QUOTE_URL, &query).await
    }

    /// Session crumb, fetched once and reused.
    async fn crumb(&self) -> Result<String> {
        let mut cached = self.crumb.lock().await;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }

        self.prime_session(COOKIE_URL).await;

        let crumb = self.get_text(CRUMB_URL, &[]).await?;
        let crumb = crumb.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(DataError::YahooApi("Could not obtain session crumb".to_string()));
        }

        tracing::debug!("obtained Yahoo session crumb");
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    /// Visit `url` for its session cookie. Only the cookie matters; the page
    /// itself usually answers 404. Returns whether the request went through.
    async fn prime_session(&self, url: &str) -> bool {
        self.rate_limiter.lock().await.wait().await;
        match self.client.get(url).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(%url, error = %e, "session cookie request failed");
                false
            }
        }
    }

    async fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        self.rate_limiter.lock().await.wait().await;

        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(DataError::Network)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok());
            return Err(DataError::RateLimit {
                retry_after_ms: retry_after_ms(retry_after),
            });
        }
        if !status.is_success() {
            return Err(DataError::Http(format!("{} returned HTTP {}", url, status)));
        }

        response.text().await.map_err(DataError::Network)
    }
}

/// Milliseconds to wait given a `Retry-After` header in seconds.
fn retry_after_ms(header: Option<&str>) -> u64 {
    header
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map_or(DEFAULT_RETRY_AFTER_MS, |secs| secs.saturating_mul(1000))
}

impl std::fmt::Debug for YahooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limiter_spaces_requests() {
        let mut limiter = RateLimiter::new(Duration::from_millis(30));
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn test_retry_after_header() {
        assert_eq!(retry_after_ms(Some("7")), 7_000);
        assert_eq!(retry_after_ms(Some("soon")), DEFAULT_RETRY_AFTER_MS);
        assert_eq!(retry_after_ms(None), DEFAULT_RETRY_AFTER_MS);
        assert_eq!(retry_after_ms(Some(&u64::MAX.to_string())), u64::MAX);
    }

    #[tokio::test]
    async fn test_failed_cookie_request_is_not_fatal() {
        let config = FetchConfig {
            rate_limit_delay: Duration::ZERO,
            ..FetchConfig::default()
        };
        let client = YahooClient::new(&config).unwrap();
        // Nothing listens on the discard port.
        assert!(!client.prime_session("http://127.0.0.1:9/").await);
    }

    #[test]
    fn test_client_builds_from_default_config() {
        let client = YahooClient::new(&FetchConfig::default());
        assert!(client.is_ok());
    }
}
