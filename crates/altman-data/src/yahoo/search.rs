//! Symbol search and existence checks against Yahoo Finance.

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use yahoo_finance_api as yahoo;

/// One symbol match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    /// Ticker symbol
    pub ticker: String,
    /// Company name
    pub name: String,
    /// Listing exchange
    pub exchange: String,
}

/// Yahoo Finance symbol search.
pub struct YahooSymbolSearch {
    provider: yahoo::YahooConnector,
}

impl std::fmt::Debug for YahooSymbolSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooSymbolSearch").finish_non_exhaustive()
    }
}

impl YahooSymbolSearch {
    /// Create a new search client.
    pub fn new() -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
        })
    }

    /// Check whether `symbol` exists, returning its match when it does.
    ///
    /// Only an exact (case-insensitive) symbol hit counts; fuzzy name matches
    /// from the search endpoint are ignored.
    pub async fn lookup(&self, symbol: &str) -> Result<Option<SymbolMatch>> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let response = self.provider.search_ticker(symbol).await?;
        let hit = response
            .quotes
            .into_iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
            .map(|q| SymbolMatch {
                ticker: q.symbol.to_uppercase(),
                name: if q.long_name.is_empty() {
                    q.short_name
                } else {
                    q.long_name
                },
                exchange: q.exchange,
            });

        tracing::debug!(%symbol, found = hit.is_some(), "live symbol lookup");
        Ok(hit)
    }
}
