//! Error types for data operations.

use std::time::Duration;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Yahoo Finance API error
    #[error("Yahoo Finance API error: {0}")]
    YahooApi(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rate limit error
    #[error("Rate limit exceeded, please retry after {retry_after_ms}ms")]
    RateLimit {
        /// Milliseconds to wait before retrying
        retry_after_ms: u64,
    },

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),

    /// The fetch did not complete before the configured deadline.
    #[error("Fetching {symbol} timed out after {timeout:?}")]
    Timeout {
        /// Symbol that was being fetched
        symbol: String,
        /// Deadline that elapsed
        timeout: Duration,
    },

    /// A provider failure, tagged with the symbol that was being fetched.
    #[error("Failed to fetch {symbol}: {source}")]
    Transport {
        /// Symbol that was being fetched
        symbol: String,
        /// Underlying provider error
        #[source]
        source: Box<Self>,
    },
}

impl DataError {
    /// Wrap this error with the symbol whose fetch produced it.
    ///
    /// Errors that already carry a symbol are returned unchanged.
    pub fn for_symbol(self, symbol: &str) -> Self {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => self,
            other => Self::Transport {
                symbol: symbol.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Symbol the error refers to, when known.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Transport { symbol, .. } | Self::Timeout { symbol, .. } => Some(symbol),
            _ => None,
        }
    }
}

impl From<yahoo_finance_api::YahooError> for DataError {
    fn from(err: yahoo_finance_api::YahooError) -> Self {
        Self::YahooApi(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_symbol_wraps_once() {
        let err = DataError::Http("HTTP 404".to_string()).for_symbol("ZZZZ");
        assert_eq!(err.symbol(), Some("ZZZZ"));

        let rewrapped = err.for_symbol("OTHER");
        assert_eq!(rewrapped.symbol(), Some("ZZZZ"));
        assert!(rewrapped.to_string().contains("HTTP 404"));
    }

    #[test]
    fn test_timeout_is_not_rewrapped() {
        let err = DataError::Timeout {
            symbol: "AAPL".to_string(),
            timeout: Duration::from_secs(5),
        }
        .for_symbol("AAPL");
        assert!(matches!(err, DataError::Timeout { .. }));
    }
}
