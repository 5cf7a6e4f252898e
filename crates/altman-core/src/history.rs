//! Historical Z-Scores, one per fiscal year.
//!
//! Each annual balance-sheet column is paired with the nearest annual
//! income-statement column. Only the primary field names are read: a year
//! with any of them missing is skipped rather than patched up with the
//! resolver's fallbacks. Market value of equity is today's figure for every
//! year, since providers do not deliver historical market capitalization.

use crate::error::HistoryError;
use crate::registry::history_fields as fields;
use crate::zscore::{Ratios, ZScoreInputs, compute_z_score};
use altman_data::{RawStatementSet, info_keys};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default number of years kept.
pub const DEFAULT_MAX_YEARS: usize = 5;

/// Default maximum distance between paired balance-sheet and income periods.
pub const DEFAULT_MAX_PAIRING_GAP_DAYS: i64 = 180;

/// Series builder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Most recent years to keep; `0` keeps all of them
    pub max_years: usize,
    /// Income periods further than this from the balance-sheet period are not paired
    pub max_pairing_gap_days: i64,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            max_years: DEFAULT_MAX_YEARS,
            max_pairing_gap_days: DEFAULT_MAX_PAIRING_GAP_DAYS,
        }
    }
}

/// Z-Score of one fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    /// Fiscal year of the balance sheet
    pub year: i32,
    /// Balance-sheet period
    pub period: NaiveDate,
    /// Paired income-statement period
    pub income_period: NaiveDate,
    /// The score
    pub z_score: f64,
    /// The ratios behind it
    pub ratios: Ratios,
}

/// Builds the historical series.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesBuilder {
    config: SeriesConfig,
}

impl SeriesBuilder {
    /// Create a builder.
    pub const fn new(config: SeriesConfig) -> Self {
        Self { config }
    }

    /// Points sorted by ascending year, at most one per year.
    pub fn build(&self, raw: &RawStatementSet) -> Result<Vec<HistoricalPoint>, HistoryError> {
        let balance = &raw.annual_balance_sheet;
        let income = &raw.annual_income_statement;
        if balance.is_empty() || income.is_empty() {
            return Err(HistoryError::NoHistory {
                ticker: raw.ticker.clone(),
            });
        }

        let market_value_equity = raw.info.number(info_keys::MARKET_CAP);
        let mut seen_years = HashSet::new();
        let mut points = Vec::new();

        for &period in balance.periods() {
            let year = period.year();
            if seen_years.contains(&year) {
                continue;
            }

            let Some(income_period) = self.pair(period, income.periods()) else {
                tracing::debug!(ticker = %raw.ticker, %period, "no income period within range");
                continue;
            };

            let bs = |name: &str| balance.value(name, period);
            let is = |name: &str| income.value(name, income_period);
            let (
                Some(total_assets),
                Some(total_liabilities),
                Some(current_assets),
                Some(current_liabilities),
                Some(retained_earnings),
                Some(ebit),
                Some(sales),
                Some(market_value_equity),
            ) = (
                bs(fields::TOTAL_ASSETS),
                bs(fields::TOTAL_LIABILITIES),
                bs(fields::CURRENT_ASSETS),
                bs(fields::CURRENT_LIABILITIES),
                bs(fields::RETAINED_EARNINGS),
                is(fields::EBIT),
                is(fields::SALES),
                market_value_equity,
            )
            else {
                tracing::debug!(ticker = %raw.ticker, %period, "incomplete year skipped");
                continue;
            };

            let inputs = ZScoreInputs {
                total_assets,
                total_liabilities,
                working_capital: current_assets - current_liabilities,
                retained_earnings,
                ebit,
                market_value_equity,
                sales,
            };
            let ratios = match Ratios::from_inputs(&inputs) {
                Ok(ratios) => ratios,
                Err(e) => {
                    tracing::debug!(ticker = %raw.ticker, %period, error = %e, "year skipped");
                    continue;
                }
            };

            seen_years.insert(year);
            points.push(HistoricalPoint {
                year,
                period,
                income_period,
                z_score: compute_z_score(ratios).score,
                ratios,
            });
        }

        points.sort_by_key(|p| p.year);
        if self.config.max_years > 0 && points.len() > self.config.max_years {
            points.drain(..points.len() - self.config.max_years);
        }

        if points.is_empty() {
            return Err(HistoryError::Unavailable {
                ticker: raw.ticker.clone(),
            });
        }
        tracing::debug!(ticker = %raw.ticker, years = points.len(), "built history");
        Ok(points)
    }

    /// Nearest income period to `period`, if within the configured gap.
    ///
    /// Ties go to the period that comes first in column order.
    fn pair(&self, period: NaiveDate, candidates: &[NaiveDate]) -> Option<NaiveDate> {
        let mut best: Option<(NaiveDate, i64)> = None;
        for &candidate in candidates {
            let gap = (candidate - period).num_days().abs();
            if best.is_none_or(|(_, best_gap)| gap < best_gap) {
                best = Some((candidate, gap));
            }
        }
        best.filter(|(_, gap)| *gap <= self.config.max_pairing_gap_days)
            .map(|(candidate, _)| candidate)
    }
}

/// Build up to `max_years` historical points with default pairing rules.
pub fn build_series(
    raw: &RawStatementSet,
    max_years: usize,
) -> Result<Vec<HistoricalPoint>, HistoryError> {
    SeriesBuilder::new(SeriesConfig {
        max_years,
        ..SeriesConfig::default()
    })
    .build(raw)
}
