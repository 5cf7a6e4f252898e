//! Field resolution: raw statements in, canonical financials out.
//!
//! Every quantity has an ordered chain of [`Strategy`] descriptors (see
//! [`registry::chain`](crate::registry::chain)). A manual override, when one
//! exists for the ticker, is tried before the chain. The first candidate that
//! passes the acceptance check wins and is recorded with its [`Provenance`].
//! Denominators (total assets, total liabilities) reject zero, so a zero in
//! one source falls through to the next.

pub mod derivations;
pub mod overrides;
pub mod strategy;

pub use overrides::OverrideTable;
pub use strategy::{Derivation, Observation, ResolutionContext, Resolved, Strategy};

use crate::error::{ResolutionError, ScoreError};
use crate::provenance::{PeriodRef, Provenance, ProvenanceMap};
use crate::quantity::Quantity;
use crate::registry;
use crate::zscore::{Ratios, ZScore, ZScoreInputs, compute_z_score};
use altman_data::RawStatementSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strategy::{BALANCE_SHEETS, INCOME_STATEMENTS};

/// Normalized figures for one company at its latest reporting date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalFinancials {
    /// Company name, or the ticker when the provider has none
    pub company_name: String,
    /// Ticker symbol
    pub ticker: String,
    /// Latest balance-sheet period
    pub report_date: NaiveDate,
    /// Total assets
    pub total_assets: f64,
    /// Total liabilities
    pub total_liabilities: f64,
    /// Current assets
    pub current_assets: f64,
    /// Current liabilities
    pub current_liabilities: f64,
    /// Current assets minus current liabilities
    pub working_capital: f64,
    /// Retained earnings
    pub retained_earnings: f64,
    /// Earnings before interest and taxes
    pub ebit: f64,
    /// Sales
    pub sales: f64,
    /// Market value of equity
    pub market_value_equity: f64,
    /// Where each value came from
    pub provenance: ProvenanceMap,
}

impl CanonicalFinancials {
    /// Value of `quantity`.
    pub const fn value(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::TotalAssets => self.total_assets,
            Quantity::TotalLiabilities => self.total_liabilities,
            Quantity::CurrentAssets => self.current_assets,
            Quantity::CurrentLiabilities => self.current_liabilities,
            Quantity::WorkingCapital => self.working_capital,
            Quantity::RetainedEarnings => self.retained_earnings,
            Quantity::Ebit => self.ebit,
            Quantity::Sales => self.sales,
            Quantity::MarketValueEquity => self.market_value_equity,
        }
    }

    /// Inputs to the ratio computation.
    pub const fn inputs(&self) -> ZScoreInputs {
        ZScoreInputs {
            total_assets: self.total_assets,
            total_liabilities: self.total_liabilities,
            working_capital: self.working_capital,
            retained_earnings: self.retained_earnings,
            ebit: self.ebit,
            market_value_equity: self.market_value_equity,
            sales: self.sales,
        }
    }

    /// The five Altman ratios.
    pub fn ratios(&self) -> Result<Ratios, ScoreError> {
        Ratios::from_financials(self)
    }

    /// Z-Score of the current period.
    pub fn z_score(&self) -> Result<ZScore, ScoreError> {
        self.ratios().map(compute_z_score)
    }
}

/// Resolves raw statements into [`CanonicalFinancials`].
#[derive(Debug, Clone, Default)]
pub struct FieldResolver {
    overrides: OverrideTable,
}

impl FieldResolver {
    /// Resolver with the built-in override table.
    pub fn new() -> Self {
        Self::with_overrides(OverrideTable::builtin())
    }

    /// Resolver with a custom override table.
    pub const fn with_overrides(overrides: OverrideTable) -> Self {
        Self { overrides }
    }

    /// The override table in use.
    pub const fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Resolve every canonical quantity.
    ///
    /// Fails with [`ResolutionError::NoPeriodData`] when either statement
    /// family has no period at all, and with
    /// [`ResolutionError::MissingFields`] listing every quantity no strategy
    /// could produce.
    pub fn resolve(&self, raw: &RawStatementSet) -> Result<CanonicalFinancials, ResolutionError> {
        let balance_period = BALANCE_SHEETS
            .into_iter()
            .find_map(|kind| raw.statement(kind).latest_period());
        let income_period = INCOME_STATEMENTS
            .into_iter()
            .find_map(|kind| raw.statement(kind).latest_period());
        let (Some(report_date), Some(_)) = (balance_period, income_period) else {
            tracing::warn!(ticker = %raw.ticker, "no statement periods");
            return Err(ResolutionError::NoPeriodData {
                ticker: raw.ticker.clone(),
            });
        };

        let mut values: BTreeMap<Quantity, f64> = BTreeMap::new();
        let mut provenance = ProvenanceMap::new();

        for quantity in Quantity::CANONICAL {
            let found = {
                let ctx = ResolutionContext::new(raw, &values);
                self.resolve_quantity(quantity, &ctx)
            };
            match found {
                Some(resolved) => {
                    tracing::debug!(
                        ticker = %raw.ticker,
                        %quantity,
                        value = resolved.value,
                        source = %resolved.provenance.source,
                        "resolved"
                    );
                    values.insert(quantity, resolved.value);
                    provenance.insert(quantity, resolved.provenance);
                }
                None => tracing::debug!(ticker = %raw.ticker, %quantity, "unresolved"),
            }
        }

        if let (Some(assets), Some(liabilities)) = (
            values.get(&Quantity::CurrentAssets).copied(),
            values.get(&Quantity::CurrentLiabilities).copied(),
        ) {
            values.insert(Quantity::WorkingCapital, assets - liabilities);
            provenance.insert(
                Quantity::WorkingCapital,
                Provenance::calculated(
                    format!("Calculated from {assets} - {liabilities}"),
                    PeriodRef::NotApplicable,
                ),
            );
        }

        let missing: Vec<Quantity> = Quantity::CANONICAL
            .into_iter()
            .filter(|q| !values.contains_key(q))
            .collect();
        if !missing.is_empty() {
            tracing::warn!(ticker = %raw.ticker, ?missing, "missing required fields");
            return Err(ResolutionError::MissingFields {
                ticker: raw.ticker.clone(),
                missing,
                provenance,
            });
        }

        let value = |q: Quantity| values.get(&q).copied();
        match (
            value(Quantity::TotalAssets),
            value(Quantity::TotalLiabilities),
            value(Quantity::CurrentAssets),
            value(Quantity::CurrentLiabilities),
            value(Quantity::WorkingCapital),
            value(Quantity::RetainedEarnings),
            value(Quantity::Ebit),
            value(Quantity::Sales),
            value(Quantity::MarketValueEquity),
        ) {
            (
                Some(total_assets),
                Some(total_liabilities),
                Some(current_assets),
                Some(current_liabilities),
                Some(working_capital),
                Some(retained_earnings),
                Some(ebit),
                Some(sales),
                Some(market_value_equity),
            ) => Ok(CanonicalFinancials {
                company_name: raw.company_name().to_string(),
                ticker: raw.ticker.clone(),
                report_date,
                total_assets,
                total_liabilities,
                current_assets,
                current_liabilities,
                working_capital,
                retained_earnings,
                ebit,
                sales,
                market_value_equity,
                provenance,
            }),
            _ => Err(ResolutionError::MissingFields {
                ticker: raw.ticker.clone(),
                missing: vec![Quantity::WorkingCapital],
                provenance,
            }),
        }
    }

    fn resolve_quantity(&self, quantity: Quantity, ctx: &ResolutionContext<'_>) -> Option<Resolved> {
        let manual = self
            .overrides
            .get(&ctx.raw.ticker, quantity)
            .map(|value| Resolved {
                value,
                provenance: Provenance::hardcoded(),
            });

        manual
            .into_iter()
            .chain(
                registry::chain(quantity)
                    .iter()
                    .filter_map(|strategy| {
                        let candidate = strategy.evaluate(ctx);
                        if candidate.is_none() {
                            tracing::trace!(%quantity, strategy = %strategy.describe(), "no candidate");
                        }
                        candidate
                    }),
            )
            .find(|candidate| {
                let accepted = is_acceptable(quantity, candidate.value);
                if !accepted {
                    tracing::debug!(
                        %quantity,
                        value = candidate.value,
                        source = %candidate.provenance.source,
                        "rejected candidate"
                    );
                }
                accepted
            })
    }
}

/// Acceptance check applied to every candidate.
fn is_acceptable(quantity: Quantity, value: f64) -> bool {
    value.is_finite() && !(quantity.is_denominator() && value == 0.0)
}

/// Resolve with the default resolver.
pub fn resolve(raw: &RawStatementSet) -> Result<CanonicalFinancials, ResolutionError> {
    FieldResolver::new().resolve(raw)
}
