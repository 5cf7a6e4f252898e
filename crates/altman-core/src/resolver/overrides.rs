//! Per-ticker manual values that take precedence over every strategy.

use crate::quantity::Quantity;
use std::collections::HashMap;

/// Manual overrides keyed by ticker and quantity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideTable {
    entries: HashMap<String, HashMap<Quantity, f64>>,
}

impl OverrideTable {
    /// An empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table.
    ///
    /// Apple's reported current assets and liabilities are split across
    /// fields the statement tables do not always carry.
    pub fn builtin() -> Self {
        Self::empty()
            .with("AAPL", Quantity::CurrentAssets, 143_600_000_000.0)
            .with("AAPL", Quantity::CurrentLiabilities, 125_600_000_000.0)
    }

    /// Add an override, replacing any existing one.
    pub fn with(mut self, ticker: &str, quantity: Quantity, value: f64) -> Self {
        self.insert(ticker, quantity, value);
        self
    }

    /// Add an override, replacing any existing one.
    pub fn insert(&mut self, ticker: &str, quantity: Quantity, value: f64) {
        self.entries
            .entry(ticker.trim().to_uppercase())
            .or_default()
            .insert(quantity, value);
    }

    /// Override for `ticker` and `quantity`, if any.
    pub fn get(&self, ticker: &str, quantity: Quantity) -> Option<f64> {
        self.entries
            .get(&ticker.to_uppercase())
            .and_then(|by_quantity| by_quantity.get(&quantity))
            .copied()
    }

    /// Whether the table holds no overrides.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_aapl_current_figures() {
        let table = OverrideTable::builtin();
        assert_eq!(
            table.get("AAPL", Quantity::CurrentAssets),
            Some(143_600_000_000.0)
        );
        assert_eq!(
            table.get("aapl", Quantity::CurrentLiabilities),
            Some(125_600_000_000.0)
        );
        assert_eq!(table.get("AAPL", Quantity::TotalAssets), None);
        assert_eq!(table.get("MSFT", Quantity::CurrentAssets), None);
    }

    #[test]
    fn test_empty() {
        assert!(OverrideTable::empty().is_empty());
        assert!(!OverrideTable::builtin().is_empty());
    }
}
