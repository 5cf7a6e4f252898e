//! Built-in list of widely followed companies.

use altman_data::SymbolMatch;

/// Exchange label given to entries of the built-in list.
pub const POPULAR_EXCHANGE: &str = "Popular Stock";

/// A company on the built-in list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularCompany {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    pub name: String,
}

impl PopularCompany {
    /// Create a new entry.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    /// Whether `query` (lower-cased) occurs in the symbol or the name.
    fn matches(&self, query: &str) -> bool {
        self.symbol.to_lowercase().contains(query) || self.name.to_lowercase().contains(query)
    }

    fn to_match(&self) -> SymbolMatch {
        SymbolMatch {
            ticker: self.symbol.clone(),
            name: self.name.clone(),
            exchange: POPULAR_EXCHANGE.to_string(),
        }
    }
}

/// The built-in company list, searchable offline.
#[derive(Debug, Clone)]
pub struct PopularSymbols {
    companies: Vec<PopularCompany>,
}

impl PopularSymbols {
    /// Create the list with its default entries.
    pub fn new() -> Self {
        Self {
            companies: Self::default_companies(),
        }
    }

    /// Get all entries.
    pub fn companies(&self) -> &[PopularCompany] {
        &self.companies
    }

    /// Check if a symbol is on the list.
    pub fn contains(&self, symbol: &str) -> bool {
        self.companies
            .iter()
            .any(|c| c.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Entries whose symbol or name contains `query`, case-insensitively.
    pub fn matching(&self, query: &str) -> Vec<SymbolMatch> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.companies
            .iter()
            .filter(|c| c.matches(&query))
            .map(PopularCompany::to_match)
            .collect()
    }

    fn default_companies() -> Vec<PopularCompany> {
        vec![
            PopularCompany::new("AAPL", "Apple Inc."),
            PopularCompany::new("MSFT", "Microsoft Corporation"),
            PopularCompany::new("GOOGL", "Alphabet Inc."),
            PopularCompany::new("AMZN", "Amazon.com, Inc."),
            PopularCompany::new("META", "Meta Platforms, Inc."),
            PopularCompany::new("TSLA", "Tesla, Inc."),
            PopularCompany::new("NVDA", "NVIDIA Corporation"),
            PopularCompany::new("JPM", "JPMorgan Chase & Co."),
            PopularCompany::new("WMT", "Walmart Inc."),
            PopularCompany::new("JNJ", "Johnson & Johnson"),
            PopularCompany::new("V", "Visa Inc."),
            PopularCompany::new("PG", "Procter & Gamble Co."),
            PopularCompany::new("BAC", "Bank of America Corp."),
            PopularCompany::new("HD", "Home Depot Inc."),
        ]
    }
}

impl Default for PopularSymbols {
    fn default() -> Self {
        Self::new()
    }
}
