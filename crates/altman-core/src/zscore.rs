//! Altman Z-Score calculation and risk classification.
//!
//! Z = 1.2·X1 + 1.4·X2 + 3.3·X3 + 0.6·X4 + 0.999·X5, where
//!
//! - X1 = Working Capital / Total Assets
//! - X2 = Retained Earnings / Total Assets
//! - X3 = EBIT / Total Assets
//! - X4 = Market Value of Equity / Total Liabilities
//! - X5 = Sales / Total Assets
//!
//! Scores above 2.99 are in the safe zone, scores below 1.81 in the distress
//! zone, and everything in between (both bounds included) in the grey zone.

use crate::error::ScoreError;
use crate::quantity::Quantity;
use crate::resolver::CanonicalFinancials;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Coefficients for X1..X5.
pub const WEIGHTS: [f64; 5] = [1.2, 1.4, 3.3, 0.6, 0.999];

/// Scores strictly above this are Low Risk.
pub const SAFE_THRESHOLD: f64 = 2.99;

/// Scores strictly below this are High Risk.
pub const DISTRESS_THRESHOLD: f64 = 1.81;

/// Labels of X1..X5 as shown in component tables.
pub const RATIO_LABELS: [&str; 5] = [
    "Working Capital / Total Assets",
    "Retained Earnings / Total Assets",
    "EBIT / Total Assets",
    "Market Value of Equity / Total Liabilities",
    "Sales / Total Assets",
];

/// The seven figures the five ratios are built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreInputs {
    /// Total assets, denominator of X1, X2, X3, X5
    pub total_assets: f64,
    /// Total liabilities, denominator of X4
    pub total_liabilities: f64,
    /// Current assets minus current liabilities
    pub working_capital: f64,
    /// Retained earnings
    pub retained_earnings: f64,
    /// Earnings before interest and taxes
    pub ebit: f64,
    /// Market value of equity
    pub market_value_equity: f64,
    /// Sales
    pub sales: f64,
}

/// The five Altman ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ratios {
    /// X1
    pub working_capital_to_assets: f64,
    /// X2
    pub retained_earnings_to_assets: f64,
    /// X3
    pub ebit_to_assets: f64,
    /// X4
    pub market_equity_to_liabilities: f64,
    /// X5
    pub sales_to_assets: f64,
}

impl Ratios {
    /// Ratios from precomputed values.
    pub const fn new(x1: f64, x2: f64, x3: f64, x4: f64, x5: f64) -> Self {
        Self {
            working_capital_to_assets: x1,
            retained_earnings_to_assets: x2,
            ebit_to_assets: x3,
            market_equity_to_liabilities: x4,
            sales_to_assets: x5,
        }
    }

    /// Compute the ratios, rejecting zero or non-finite denominators.
    pub fn from_inputs(inputs: &ZScoreInputs) -> Result<Self, ScoreError> {
        let assets = checked_denominator(inputs.total_assets, Quantity::TotalAssets)?;
        let liabilities =
            checked_denominator(inputs.total_liabilities, Quantity::TotalLiabilities)?;

        Ok(Self::new(
            inputs.working_capital / assets,
            inputs.retained_earnings / assets,
            inputs.ebit / assets,
            inputs.market_value_equity / liabilities,
            inputs.sales / assets,
        ))
    }

    /// Ratios of resolved financials.
    pub fn from_financials(financials: &CanonicalFinancials) -> Result<Self, ScoreError> {
        Self::from_inputs(&financials.inputs())
    }

    /// `[X1, X2, X3, X4, X5]`
    pub const fn as_array(&self) -> [f64; 5] {
        [
            self.working_capital_to_assets,
            self.retained_earnings_to_assets,
            self.ebit_to_assets,
            self.market_equity_to_liabilities,
            self.sales_to_assets,
        ]
    }

    /// Each ratio multiplied by its coefficient.
    pub fn weighted(&self) -> [f64; 5] {
        let values = self.as_array();
        std::array::from_fn(|i| values[i] * WEIGHTS[i])
    }

    /// Component rows: label, raw ratio, weighted contribution.
    pub fn components(&self) -> Vec<Component> {
        let values = self.as_array();
        let weighted = self.weighted();
        RATIO_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| Component {
                label: format!("{label} (X{})", i + 1),
                value: values[i],
                weight: WEIGHTS[i],
                contribution: weighted[i],
            })
            .collect()
    }

    /// Weighted sum of the ratios.
    pub fn score(&self) -> f64 {
        self.weighted().iter().sum()
    }
}

fn checked_denominator(value: f64, quantity: Quantity) -> Result<f64, ScoreError> {
    if value == 0.0 || !value.is_finite() {
        return Err(ScoreError::ZeroDenominator { quantity });
    }
    Ok(value)
}

/// One row of the components table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Ratio label, e.g. `"EBIT / Total Assets (X3)"`
    pub label: String,
    /// Raw ratio
    pub value: f64,
    /// Coefficient
    pub weight: f64,
    /// `value * weight`
    pub contribution: f64,
}

/// Three-way bankruptcy-risk classification.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    /// z > 2.99
    #[display("Low Risk")]
    LowRisk,
    /// 1.81 ≤ z ≤ 2.99
    #[display("Grey Zone")]
    GreyZone,
    /// z < 1.81
    #[display("High Risk")]
    HighRisk,
}

impl RiskCategory {
    /// Classify a score. Both thresholds belong to the grey zone.
    pub fn classify(z: f64) -> Self {
        if z > SAFE_THRESHOLD {
            Self::LowRisk
        } else if z >= DISTRESS_THRESHOLD {
            Self::GreyZone
        } else {
            Self::HighRisk
        }
    }

    /// Zone name.
    pub const fn zone(&self) -> &'static str {
        match self {
            Self::LowRisk => "Safe Zone",
            Self::GreyZone => "Grey Zone",
            Self::HighRisk => "Distress Zone",
        }
    }

    /// Interpretation shown next to the score.
    pub const fn explanation(&self) -> &'static str {
        match self {
            Self::LowRisk => {
                "This company appears to be financially sound with low bankruptcy risk \
                 within the next 2 years. The strong Z-Score indicates good financial health."
            }
            Self::GreyZone => {
                "This company shows some financial stress and moderate bankruptcy risk. \
                 Further analysis is recommended as the Z-Score falls in an indeterminate range."
            }
            Self::HighRisk => {
                "This company shows significant financial distress with high bankruptcy risk \
                 within the next 2 years. The low Z-Score indicates serious financial problems."
            }
        }
    }
}

/// A computed score with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScore {
    /// The weighted sum
    pub score: f64,
    /// Risk classification of `score`
    pub category: RiskCategory,
    /// The ratios the score was computed from
    pub ratios: Ratios,
}

impl ZScore {
    /// Interpretation text for the category.
    pub const fn explanation(&self) -> &'static str {
        self.category.explanation()
    }
}

/// Compute the Z-Score and its category.
pub fn compute_z_score(ratios: Ratios) -> ZScore {
    let score = ratios.score();
    ZScore {
        score,
        category: RiskCategory::classify(score),
        ratios,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_grey_zone_example() {
        let z = compute_z_score(Ratios::new(0.1, 0.2, 0.15, 1.0, 0.8));
        assert_relative_eq!(z.score, 2.2942, epsilon = 1e-9);
        assert_eq!(z.category, RiskCategory::GreyZone);
    }

    #[test]
    fn test_sum_is_order_independent() {
        let ratios = Ratios::new(0.1, 0.2, 0.15, 1.0, 0.8);
        let forward = ratios.score();
        let backward: f64 = ratios.weighted().iter().rev().sum();
        assert_relative_eq!(forward, backward, epsilon = 1e-12);
    }

    #[rstest]
    #[case(2.99, RiskCategory::GreyZone)]
    #[case(2.990001, RiskCategory::LowRisk)]
    #[case(1.81, RiskCategory::GreyZone)]
    #[case(1.809999, RiskCategory::HighRisk)]
    #[case(5.0, RiskCategory::LowRisk)]
    #[case(-0.5, RiskCategory::HighRisk)]
    fn test_classification_boundaries(#[case] z: f64, #[case] expected: RiskCategory) {
        assert_eq!(RiskCategory::classify(z), expected);
    }

    #[test]
    fn test_from_inputs() {
        let inputs = ZScoreInputs {
            total_assets: 1000.0,
            total_liabilities: 400.0,
            working_capital: 200.0,
            retained_earnings: 150.0,
            ebit: 120.0,
            market_value_equity: 800.0,
            sales: 500.0,
        };
        let ratios = Ratios::from_inputs(&inputs).unwrap();
        assert_relative_eq!(ratios.working_capital_to_assets, 0.2);
        assert_relative_eq!(ratios.retained_earnings_to_assets, 0.15);
        assert_relative_eq!(ratios.ebit_to_assets, 0.12);
        assert_relative_eq!(ratios.market_equity_to_liabilities, 2.0);
        assert_relative_eq!(ratios.sales_to_assets, 0.5);
    }

    #[rstest]
    #[case(0.0, 400.0, Quantity::TotalAssets)]
    #[case(1000.0, 0.0, Quantity::TotalLiabilities)]
    #[case(f64::NAN, 400.0, Quantity::TotalAssets)]
    fn test_zero_denominator(#[case] assets: f64, #[case] liabilities: f64, #[case] quantity: Quantity) {
        let inputs = ZScoreInputs {
            total_assets: assets,
            total_liabilities: liabilities,
            working_capital: 1.0,
            retained_earnings: 1.0,
            ebit: 1.0,
            market_value_equity: 1.0,
            sales: 1.0,
        };
        assert_eq!(
            Ratios::from_inputs(&inputs),
            Err(ScoreError::ZeroDenominator { quantity })
        );
    }

    #[test]
    fn test_components_table() {
        let components = Ratios::new(0.1, 0.2, 0.15, 1.0, 0.8).components();
        assert_eq!(components.len(), 5);
        assert_eq!(components[2].label, "EBIT / Total Assets (X3)");
        assert_relative_eq!(components[2].contribution, 0.495, epsilon = 1e-12);
        assert_relative_eq!(components[4].weight, 0.999);
    }

    #[test]
    fn test_category_texts() {
        assert_eq!(RiskCategory::LowRisk.to_string(), "Low Risk");
        assert_eq!(RiskCategory::HighRisk.zone(), "Distress Zone");
        assert!(RiskCategory::GreyZone.explanation().contains("indeterminate"));
    }
}
