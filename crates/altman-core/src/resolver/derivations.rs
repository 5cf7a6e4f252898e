//! Fallback computations used when no direct field is available.

use super::strategy::{
    BALANCE_SHEETS, INCOME_STATEMENTS, Observation, ResolutionContext, Resolved,
};
use crate::provenance::{PeriodRef, Provenance};
use crate::quantity::Quantity;
use crate::registry::aliases;
use altman_data::info_keys;

/// Minimum number of current-asset components, cash included.
pub const MIN_CURRENT_ASSET_COMPONENTS: usize = 3;

/// Minimum number of current-liability components.
pub const MIN_CURRENT_LIABILITY_COMPONENTS: usize = 2;

/// One summable line item of a current-assets or current-liabilities total.
#[derive(Debug, Clone, Copy)]
pub struct ComponentSpec {
    /// Short name
    pub name: &'static str,
    /// Field aliases
    pub aliases: &'static [&'static str],
}

/// Line items of current assets, cash first.
pub const CURRENT_ASSET_COMPONENTS: [ComponentSpec; 5] = [
    ComponentSpec {
        name: "cash",
        aliases: aliases::CASH,
    },
    ComponentSpec {
        name: "short_term_investments",
        aliases: aliases::SHORT_TERM_INVESTMENTS,
    },
    ComponentSpec {
        name: "receivables",
        aliases: aliases::RECEIVABLES,
    },
    ComponentSpec {
        name: "inventory",
        aliases: aliases::INVENTORY,
    },
    ComponentSpec {
        name: "other",
        aliases: aliases::OTHER_CURRENT_ASSETS,
    },
];

/// Line items of current liabilities.
pub const CURRENT_LIABILITY_COMPONENTS: [ComponentSpec; 4] = [
    ComponentSpec {
        name: "accounts_payable",
        aliases: aliases::ACCOUNTS_PAYABLE,
    },
    ComponentSpec {
        name: "short_term_debt",
        aliases: aliases::SHORT_TERM_DEBT,
    },
    ComponentSpec {
        name: "accrued",
        aliases: aliases::ACCRUED_LIABILITIES,
    },
    ComponentSpec {
        name: "other",
        aliases: aliases::OTHER_CURRENT_LIABILITIES,
    },
];

/// Total liabilities as total assets minus stockholders' equity.
pub fn liabilities_from_equity(ctx: &ResolutionContext<'_>) -> Option<Resolved> {
    let assets = ctx.resolved(Quantity::TotalAssets)?;
    let equity = ctx.lookup_any(&BALANCE_SHEETS, aliases::STOCKHOLDERS_EQUITY)?;
    Some(Resolved {
        value: assets - equity.value,
        provenance: Provenance::calculated(
            format!("Calculated from Total Assets - {}", equity.field),
            PeriodRef::Date(equity.period),
        ),
    })
}

/// Current assets as the sum of its line items.
///
/// Cash must be present, along with at least two other items.
pub fn current_assets_from_components(ctx: &ResolutionContext<'_>) -> Option<Resolved> {
    let found = find_components(ctx, &CURRENT_ASSET_COMPONENTS);
    let has_cash = found.iter().any(|(spec, _)| spec.name == "cash");
    if !has_cash || found.len() < MIN_CURRENT_ASSET_COMPONENTS {
        tracing::debug!(found = found.len(), has_cash, "too few current-asset components");
        return None;
    }
    Some(sum_components(ctx, &found))
}

/// Current liabilities as the sum of its line items.
pub fn current_liabilities_from_components(ctx: &ResolutionContext<'_>) -> Option<Resolved> {
    let found = find_components(ctx, &CURRENT_LIABILITY_COMPONENTS);
    if found.len() < MIN_CURRENT_LIABILITY_COMPONENTS {
        tracing::debug!(found = found.len(), "too few current-liability components");
        return None;
    }
    Some(sum_components(ctx, &found))
}

fn find_components(
    ctx: &ResolutionContext<'_>,
    specs: &[ComponentSpec],
) -> Vec<(ComponentSpec, Observation)> {
    specs
        .iter()
        .filter_map(|spec| {
            ctx.lookup_any(&BALANCE_SHEETS, spec.aliases)
                .map(|hit| (*spec, hit))
        })
        .collect()
}

fn sum_components(ctx: &ResolutionContext<'_>, found: &[(ComponentSpec, Observation)]) -> Resolved {
    let value = found.iter().map(|(_, hit)| hit.value).sum();
    let fields: Vec<&str> = found.iter().map(|(_, hit)| hit.field).collect();
    let period = ctx
        .balance_sheet_period()
        .map_or(PeriodRef::Latest, PeriodRef::Date);
    Resolved {
        value,
        provenance: Provenance::calculated(
            format!("Calculated from {}", fields.join(" + ")),
            period,
        ),
    }
}

/// Retained earnings as stockholders' equity minus common stock.
///
/// Each term is taken from the first balance sheet that has it; the period
/// is the equity figure's.
pub fn retained_from_equity(ctx: &ResolutionContext<'_>) -> Option<Resolved> {
    let equity = ctx.lookup_any(&BALANCE_SHEETS, aliases::STOCKHOLDERS_EQUITY)?;
    let common = ctx.lookup_any(&BALANCE_SHEETS, aliases::COMMON_STOCK)?;
    Some(Resolved {
        value: equity.value - common.value,
        provenance: Provenance::calculated(
            format!("Calculated from {} - {}", equity.field, common.field),
            PeriodRef::Date(equity.period),
        ),
    })
}

/// EBIT as net income plus interest expense plus taxes.
///
/// Interest and taxes are added as magnitudes, since providers disagree on
/// their sign. Each term is taken from the first income statement that has
/// it; the period is the net-income figure's.
pub fn ebit_from_net_income(ctx: &ResolutionContext<'_>) -> Option<Resolved> {
    let net_income = ctx.lookup_any(&INCOME_STATEMENTS, aliases::NET_INCOME)?;
    let interest = ctx.lookup_any(&INCOME_STATEMENTS, aliases::INTEREST_EXPENSE)?;
    let taxes = ctx.lookup_any(&INCOME_STATEMENTS, aliases::INCOME_TAX)?;
    Some(Resolved {
        value: net_income.value + interest.value.abs() + taxes.value.abs(),
        provenance: Provenance::calculated(
            "Calculated from Net Income + Interest + Taxes",
            PeriodRef::Date(net_income.period),
        ),
    })
}

/// Market value of equity as price times shares outstanding.
pub fn market_cap_from_price(ctx: &ResolutionContext<'_>) -> Option<Resolved> {
    let info = &ctx.raw.info;
    let (price_key, price) = [info_keys::REGULAR_MARKET_PRICE, info_keys::CURRENT_PRICE]
        .into_iter()
        .find_map(|key| info.number(key).map(|price| (key, price)))?;
    let shares = info.number(info_keys::SHARES_OUTSTANDING)?;
    Some(Resolved {
        value: price * shares,
        provenance: Provenance::calculated(
            format!(
                "Calculated from {price_key} * {}",
                info_keys::SHARES_OUTSTANDING
            ),
            PeriodRef::Current,
        ),
    })
}
