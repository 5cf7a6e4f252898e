//! Company lookup.
//!
//! Free text is matched against a built-in list of widely followed companies
//! and checked live as a ticker symbol. A live hit comes first; entries of
//! the built-in list follow, without repeating a ticker already listed.

pub mod popular;

pub use popular::{POPULAR_EXCHANGE, PopularCompany, PopularSymbols};

use altman_data::{Result, SymbolMatch, YahooSymbolSearch};
use std::future::Future;

/// A live check of whether a symbol exists.
pub trait SymbolSource: Send + Sync {
    /// Look up `symbol`, returning its match when it exists.
    fn lookup(&self, symbol: &str) -> impl Future<Output = Result<Option<SymbolMatch>>> + Send;
}

impl SymbolSource for YahooSymbolSearch {
    fn lookup(&self, symbol: &str) -> impl Future<Output = Result<Option<SymbolMatch>>> + Send {
        Self::lookup(self, symbol)
    }
}

/// Company search over the built-in list and a live symbol source.
#[derive(Debug)]
pub struct CompanySearch<S> {
    source: S,
    popular: PopularSymbols,
}

impl<S: SymbolSource> CompanySearch<S> {
    /// Create a search backed by `source` and the default popular list.
    pub fn new(source: S) -> Self {
        Self {
            source,
            popular: PopularSymbols::new(),
        }
    }

    /// Search for `query`.
    ///
    /// A failing live check is logged and treated as no hit; the built-in
    /// list is still searched.
    pub async fn search(&self, query: &str) -> Vec<SymbolMatch> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches = Vec::new();
        match self.source.lookup(query).await {
            Ok(Some(hit)) => matches.push(hit),
            Ok(None) => {}
            Err(e) => tracing::warn!(%query, error = %e, "live symbol lookup failed"),
        }

        for candidate in self.popular.matching(query) {
            if !matches
                .iter()
                .any(|m| m.ticker.eq_ignore_ascii_case(&candidate.ticker))
            {
                matches.push(candidate);
            }
        }

        tracing::debug!(%query, results = matches.len(), "company search");
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altman_data::DataError;

    struct FixedSource(Option<SymbolMatch>);

    impl SymbolSource for FixedSource {
        async fn lookup(&self, _symbol: &str) -> Result<Option<SymbolMatch>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    impl SymbolSource for BrokenSource {
        async fn lookup(&self, _symbol: &str) -> Result<Option<SymbolMatch>> {
            Err(DataError::Http("503 Service Unavailable".to_string()))
        }
    }

    fn live(ticker: &str, name: &str) -> SymbolMatch {
        SymbolMatch {
            ticker: ticker.to_string(),
            name: name.to_string(),
            exchange: "NMS".to_string(),
        }
    }

    #[tokio::test]
    async fn test_live_hit_comes_first_without_duplicate() {
        let search = CompanySearch::new(FixedSource(Some(live("AAPL", "Apple Inc."))));
        let results = search.search("aapl").await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].exchange, "NMS");
    }

    #[tokio::test]
    async fn test_live_hit_followed_by_popular_matches() {
        let search = CompanySearch::new(FixedSource(Some(live("APLE", "Apple Hospitality REIT"))));
        let results = search.search("aple").await;
        assert_eq!(results[0].ticker, "APLE");

        let results = search.search("apple").await;
        let tickers: Vec<&str> = results.iter().map(|m| m.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["APLE", "AAPL"]);
        assert_eq!(results[1].exchange, POPULAR_EXCHANGE);
    }

    #[tokio::test]
    async fn test_failed_live_check_still_searches_list() {
        let search = CompanySearch::new(BrokenSource);
        let results = search.search("tesla").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ticker, "TSLA");
    }

    #[tokio::test]
    async fn test_no_match() {
        let search = CompanySearch::new(FixedSource(None));
        assert!(search.search("zzzz").await.is_empty());
        assert!(search.search("   ").await.is_empty());
    }
}
