//! The canonical quantities the Z-Score formula needs.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A normalized financial figure.
///
/// Eight of these are resolved from statements; [`Quantity::WorkingCapital`]
/// is always derived from current assets and current liabilities.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// Total assets
    #[display("Total Assets")]
    TotalAssets,
    /// Total liabilities
    #[display("Total Liabilities")]
    TotalLiabilities,
    /// Current assets
    #[display("Current Assets")]
    CurrentAssets,
    /// Current liabilities
    #[display("Current Liabilities")]
    CurrentLiabilities,
    /// Current assets minus current liabilities
    #[display("Working Capital")]
    WorkingCapital,
    /// Retained earnings
    #[display("Retained Earnings")]
    RetainedEarnings,
    /// Earnings before interest and taxes
    #[display("EBIT")]
    Ebit,
    /// Sales / total revenue
    #[display("Sales")]
    Sales,
    /// Market value of equity
    #[display("Market Cap")]
    MarketValueEquity,
}

impl Quantity {
    /// The eight resolved quantities, in resolution order.
    ///
    /// Order matters: later derivations may read earlier results
    /// (total liabilities uses total assets).
    pub const CANONICAL: [Self; 8] = [
        Self::TotalAssets,
        Self::TotalLiabilities,
        Self::CurrentAssets,
        Self::CurrentLiabilities,
        Self::RetainedEarnings,
        Self::Ebit,
        Self::Sales,
        Self::MarketValueEquity,
    ];

    /// Every quantity, in display order.
    pub const ALL: [Self; 9] = [
        Self::TotalAssets,
        Self::TotalLiabilities,
        Self::CurrentAssets,
        Self::CurrentLiabilities,
        Self::WorkingCapital,
        Self::RetainedEarnings,
        Self::Ebit,
        Self::Sales,
        Self::MarketValueEquity,
    ];

    /// Stable display name, as used in missing-field reports.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::TotalAssets => "Total Assets",
            Self::TotalLiabilities => "Total Liabilities",
            Self::CurrentAssets => "Current Assets",
            Self::CurrentLiabilities => "Current Liabilities",
            Self::WorkingCapital => "Working Capital",
            Self::RetainedEarnings => "Retained Earnings",
            Self::Ebit => "EBIT",
            Self::Sales => "Sales",
            Self::MarketValueEquity => "Market Cap",
        }
    }

    /// snake_case key.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::TotalAssets => "total_assets",
            Self::TotalLiabilities => "total_liabilities",
            Self::CurrentAssets => "current_assets",
            Self::CurrentLiabilities => "current_liabilities",
            Self::WorkingCapital => "working_capital",
            Self::RetainedEarnings => "retained_earnings",
            Self::Ebit => "ebit",
            Self::Sales => "sales",
            Self::MarketValueEquity => "market_value_equity",
        }
    }

    /// Whether the quantity is a Z-Score denominator and so must be non-zero.
    pub const fn is_denominator(&self) -> bool {
        matches!(self, Self::TotalAssets | Self::TotalLiabilities)
    }

    /// Whether the quantity is derived rather than resolved.
    pub const fn is_derived(&self) -> bool {
        matches!(self, Self::WorkingCapital)
    }
}
