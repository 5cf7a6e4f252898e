//! The seam between the resolution engine and whatever fetches statements.

use crate::error::{DataError, Result};
use crate::statements::{CompanyInfo, RawStatementSet};
use std::future::Future;
use std::time::Duration;

/// Default deadline for one ticker's complete fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default pause between consecutive provider requests.
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(200);

/// User agent sent to remote providers.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";

/// Configuration for statement fetching.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Deadline for fetching everything one ticker needs.
    pub timeout: Duration,
    /// Minimum interval between two requests to the provider.
    pub rate_limit_delay: Duration,
    /// User agent header value.
    pub user_agent: String,
    /// How many years of statements to request.
    pub history_years: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            rate_limit_delay: DEFAULT_RATE_LIMIT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            history_years: 6,
        }
    }
}

impl FetchConfig {
    /// Override the fetch deadline.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A source of raw financial statements.
///
/// Implementations may return partially empty tables; nothing about a
/// [`RawStatementSet`] is guaranteed complete.
pub trait StatementProvider: Send + Sync {
    /// Fetch the four statement tables for `ticker`. The info record may be left empty.
    fn fetch_statements(&self, ticker: &str)
    -> impl Future<Output = Result<RawStatementSet>> + Send;

    /// Fetch the flat company-info record for `ticker`.
    fn fetch_company_info(&self, ticker: &str) -> impl Future<Output = Result<CompanyInfo>> + Send;

    /// Fetch statements and company info, sequentially.
    fn fetch_all(&self, ticker: &str) -> impl Future<Output = Result<RawStatementSet>> + Send {
        async move {
            let mut raw = self.fetch_statements(ticker).await?;
            raw.info = self.fetch_company_info(ticker).await?;
            Ok(raw)
        }
    }
}

/// Fetch everything for `ticker`, giving up after `timeout`.
///
/// Provider failures come back as [`DataError::Transport`] tagged with the
/// symbol; an elapsed deadline is [`DataError::Timeout`]. The in-flight fetch
/// is dropped on timeout.
pub async fn fetch_with_timeout<P: StatementProvider>(
    provider: &P,
    ticker: &str,
    timeout: Duration,
) -> Result<RawStatementSet> {
    let symbol = ticker.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
    }

    match tokio::time::timeout(timeout, provider.fetch_all(&symbol)).await {
        Ok(result) => result.map_err(|e| e.for_symbol(&symbol)),
        Err(_) => {
            tracing::warn!(%symbol, ?timeout, "statement fetch timed out");
            Err(DataError::Timeout { symbol, timeout })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::{StatementKind, StatementTable, info_keys};
    use chrono::NaiveDate;

    #[derive(Debug)]
    struct StaticProvider;

    impl StatementProvider for StaticProvider {
        async fn fetch_statements(&self, ticker: &str) -> Result<RawStatementSet> {
            let period = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
            Ok(RawStatementSet::new(ticker).with_statement(
                StatementKind::AnnualBalanceSheet,
                StatementTable::new().with_value("Total Assets", period, 100.0),
            ))
        }

        async fn fetch_company_info(&self, _ticker: &str) -> Result<CompanyInfo> {
            Ok(CompanyInfo::new().with(info_keys::MARKET_CAP, 50.0))
        }
    }

    #[derive(Debug)]
    struct SlowProvider;

    impl StatementProvider for SlowProvider {
        async fn fetch_statements(&self, ticker: &str) -> Result<RawStatementSet> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(RawStatementSet::new(ticker))
        }

        async fn fetch_company_info(&self, _ticker: &str) -> Result<CompanyInfo> {
            Ok(CompanyInfo::new())
        }
    }

    #[derive(Debug)]
    struct FailingProvider;

    impl StatementProvider for FailingProvider {
        async fn fetch_statements(&self, _ticker: &str) -> Result<RawStatementSet> {
            Err(DataError::RateLimit {
                retry_after_ms: 1000,
            })
        }

        async fn fetch_company_info(&self, _ticker: &str) -> Result<CompanyInfo> {
            Ok(CompanyInfo::new())
        }
    }

    #[tokio::test]
    async fn test_fetch_all_merges_info() {
        let raw = fetch_with_timeout(&StaticProvider, "abc", DEFAULT_TIMEOUT)
            .await
            .unwrap();
        assert_eq!(raw.ticker, "ABC");
        assert_eq!(raw.info.number(info_keys::MARKET_CAP), Some(50.0));
        assert!(!raw.annual_balance_sheet.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let result = fetch_with_timeout(&SlowProvider, "SLOW", Duration::from_millis(10)).await;
        match result {
            Err(DataError::Timeout { symbol, .. }) => assert_eq!(symbol, "SLOW"),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_provider_failure_is_tagged_with_symbol() {
        let err = fetch_with_timeout(&FailingProvider, "ERR", DEFAULT_TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Transport { .. }));
        assert_eq!(err.symbol(), Some("ERR"));
    }

    #[tokio::test]
    async fn test_empty_symbol_rejected() {
        let err = fetch_with_timeout(&StaticProvider, "  ", DEFAULT_TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidSymbol(_)));
    }
}
