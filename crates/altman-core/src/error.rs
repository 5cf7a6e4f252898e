//! Error types for resolution, history and scoring.

use crate::provenance::ProvenanceMap;
use crate::quantity::Quantity;
use thiserror::Error;

/// Failure to produce canonical financials from a statement set.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Neither a balance-sheet nor an income-statement period exists.
    #[error("No financial statement data available for {ticker}")]
    NoPeriodData {
        /// Ticker symbol
        ticker: String,
    },

    /// Some canonical quantities could not be resolved by any strategy.
    #[error("Missing required financial data for {ticker}: {}", display_names(.missing))]
    MissingFields {
        /// Ticker symbol
        ticker: String,
        /// Unresolved quantities, in resolution order
        missing: Vec<Quantity>,
        /// Provenance of the quantities that did resolve
        provenance: ProvenanceMap,
    },
}

impl ResolutionError {
    /// Ticker the error refers to.
    pub fn ticker(&self) -> &str {
        match self {
            Self::NoPeriodData { ticker } | Self::MissingFields { ticker, .. } => ticker,
        }
    }

    /// Display names of the missing quantities.
    pub fn missing_names(&self) -> Vec<&'static str> {
        match self {
            Self::NoPeriodData { .. } => Vec::new(),
            Self::MissingFields { missing, .. } => {
                missing.iter().map(Quantity::display_name).collect()
            }
        }
    }

    /// Partial provenance, when resolution got far enough to have one.
    pub const fn partial_provenance(&self) -> Option<&ProvenanceMap> {
        match self {
            Self::NoPeriodData { .. } => None,
            Self::MissingFields { provenance, .. } => Some(provenance),
        }
    }
}

fn display_names(missing: &[Quantity]) -> String {
    missing
        .iter()
        .map(Quantity::display_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Historical scores could not be produced.
///
/// Both variants are non-fatal: the current-period analysis stands on its own.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// No annual balance sheet or income statement columns.
    #[error("No historical data available for {ticker}")]
    NoHistory {
        /// Ticker symbol
        ticker: String,
    },

    /// Annual statements exist but no year had a complete, pairable record.
    #[error("Could not calculate historical Z-Scores for {ticker}")]
    Unavailable {
        /// Ticker symbol
        ticker: String,
    },
}

/// Ratios cannot be computed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScoreError {
    /// A Z-Score denominator is zero or not finite.
    #[error("{quantity} is zero or not finite")]
    ZeroDenominator {
        /// The offending denominator
        quantity: Quantity,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_display_names() {
        let err = ResolutionError::MissingFields {
            ticker: "ACME".to_string(),
            missing: vec![Quantity::RetainedEarnings, Quantity::MarketValueEquity],
            provenance: ProvenanceMap::new(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required financial data for ACME: Retained Earnings, Market Cap"
        );
        assert_eq!(err.missing_names(), vec!["Retained Earnings", "Market Cap"]);
        assert!(err.partial_provenance().is_some());
    }

    #[test]
    fn test_no_period_data() {
        let err = ResolutionError::NoPeriodData {
            ticker: "ACME".to_string(),
        };
        assert_eq!(err.ticker(), "ACME");
        assert!(err.missing_names().is_empty());
        assert!(err.partial_provenance().is_none());
    }
}
