//! Resolution Registry
//!
//! Field aliases and the ordered strategy chain for every canonical quantity.
//! The resolver walks a chain front to back and keeps the first acceptable
//! result.

use crate::quantity::Quantity;
use crate::resolver::derivations;
use crate::resolver::strategy::Strategy;
use altman_data::StatementKind::{
    AnnualBalanceSheet, AnnualIncomeStatement, QuarterlyBalanceSheet, QuarterlyIncomeStatement,
};
use altman_data::info_keys;
use std::collections::HashMap;

/// Field names seen across providers, most common first.
pub mod aliases {
    /// Total assets
    pub const TOTAL_ASSETS: &[&str] = &["Total Assets", "TotalAssets"];
    /// Total liabilities
    pub const TOTAL_LIABILITIES: &[&str] = &[
        "Total Liab",
        "TotalLiab",
        "Total Liabilities",
        "Total Liabilities Net Minority Interest",
        "TotalLiabilitiesNetMinorityInterest",
    ];
    /// Stockholders' equity
    pub const STOCKHOLDERS_EQUITY: &[&str] = &[
        "Total Stockholder Equity",
        "StockholdersEquity",
        "Stockholders Equity",
    ];
    /// Current assets
    pub const CURRENT_ASSETS: &[&str] = &[
        "Total Current Assets",
        "CurrentAssets",
        "totalCurrentAssets",
        "Current Assets",
        "Total Current Assets Total",
    ];
    /// Current liabilities
    pub const CURRENT_LIABILITIES: &[&str] = &[
        "Total Current Liabilities",
        "CurrentLiabilities",
        "totalCurrentLiabilities",
        "Current Liabilities",
        "Total Current Liabilities Total",
    ];
    /// Cash and equivalents
    pub const CASH: &[&str] = &[
        "Cash And Cash Equivalents",
        "Cash",
        "CashAndCashEquivalents",
        "cashAndCashEquivalents",
    ];
    /// Short-term investments
    pub const SHORT_TERM_INVESTMENTS: &[&str] = &[
        "Short Term Investments",
        "ShortTermInvestments",
        "shortTermInvestments",
    ];
    /// Receivables
    pub const RECEIVABLES: &[&str] = &[
        "Net Receivables",
        "Receivables",
        "AccountsReceivable",
        "accountsReceivable",
    ];
    /// Inventory
    pub const INVENTORY: &[&str] = &["Inventory", "Inventories", "inventory", "inventories"];
    /// Other current assets
    pub const OTHER_CURRENT_ASSETS: &[&str] = &[
        "Other Current Assets",
        "OtherCurrentAssets",
        "otherCurrentAssets",
    ];
    /// Accounts payable
    pub const ACCOUNTS_PAYABLE: &[&str] =
        &["Accounts Payable", "AccountsPayable", "accountsPayable"];
    /// Short-term debt
    pub const SHORT_TERM_DEBT: &[&str] = &["Short Term Debt", "ShortTermDebt", "shortTermDebt"];
    /// Accrued liabilities
    pub const ACCRUED_LIABILITIES: &[&str] = &[
        "Accrued Liabilities",
        "AccruedLiabilities",
        "accruedLiabilities",
    ];
    /// Other current liabilities
    pub const OTHER_CURRENT_LIABILITIES: &[&str] = &[
        "Other Current Liabilities",
        "OtherCurrentLiabilities",
        "otherCurrentLiabilities",
    ];
    /// Retained earnings
    pub const RETAINED_EARNINGS: &[&str] = &["Retained Earnings", "RetainedEarnings"];
    /// Common stock
    pub const COMMON_STOCK: &[&str] = &["Common Stock", "CommonStock"];
    /// EBIT
    pub const EBIT: &[&str] = &["Ebit", "EBIT", "Operating Income", "OperatingIncome"];
    /// Net income
    pub const NET_INCOME: &[&str] = &["Net Income", "NetIncome"];
    /// Interest expense
    pub const INTEREST_EXPENSE: &[&str] = &["Interest Expense", "InterestExpense"];
    /// Income tax
    pub const INCOME_TAX: &[&str] = &[
        "Income Tax Expense",
        "IncomeTaxExpense",
        "Tax Provision",
        "TaxProvision",
    ];
    /// Sales
    pub const SALES: &[&str] = &["Total Revenue", "Revenue", "TotalRevenue"];
}

/// Field names the historical series reads, one per quantity.
///
/// History uses exact names only; no aliasing and no derivations.
pub mod history_fields {
    /// Total assets
    pub const TOTAL_ASSETS: &str = "Total Assets";
    /// Total liabilities
    pub const TOTAL_LIABILITIES: &str = "Total Liab";
    /// Current assets
    pub const CURRENT_ASSETS: &str = "Total Current Assets";
    /// Current liabilities
    pub const CURRENT_LIABILITIES: &str = "Total Current Liabilities";
    /// Retained earnings
    pub const RETAINED_EARNINGS: &str = "Retained Earnings";
    /// EBIT
    pub const EBIT: &str = "Ebit";
    /// Sales
    pub const SALES: &str = "Total Revenue";
}

const TOTAL_ASSETS_CHAIN: &[Strategy] = &[
    Strategy::Lookup {
        statement: AnnualBalanceSheet,
        aliases: aliases::TOTAL_ASSETS,
    },
    Strategy::Lookup {
        statement: QuarterlyBalanceSheet,
        aliases: aliases::TOTAL_ASSETS,
    },
];

const TOTAL_LIABILITIES_CHAIN: &[Strategy] = &[
    Strategy::Lookup {
        statement: AnnualBalanceSheet,
        aliases: aliases::TOTAL_LIABILITIES,
    },
    Strategy::Lookup {
        statement: QuarterlyBalanceSheet,
        aliases: aliases::TOTAL_LIABILITIES,
    },
    Strategy::Derive {
        name: "assets_minus_equity",
        derive: derivations::liabilities_from_equity,
    },
];

const CURRENT_ASSETS_CHAIN: &[Strategy] = &[
    Strategy::Lookup {
        statement: AnnualBalanceSheet,
        aliases: aliases::CURRENT_ASSETS,
    },
    Strategy::Lookup {
        statement: QuarterlyBalanceSheet,
        aliases: aliases::CURRENT_ASSETS,
    },
    Strategy::Derive {
        name: "sum_of_components",
        derive: derivations::current_assets_from_components,
    },
];

const CURRENT_LIABILITIES_CHAIN: &[Strategy] = &[
    Strategy::Lookup {
        statement: AnnualBalanceSheet,
        aliases: aliases::CURRENT_LIABILITIES,
    },
    Strategy::Lookup {
        statement: QuarterlyBalanceSheet,
        aliases: aliases::CURRENT_LIABILITIES,
    },
    Strategy::Derive {
        name: "sum_of_components",
        derive: derivations::current_liabilities_from_components,
    },
];

const RETAINED_EARNINGS_CHAIN: &[Strategy] = &[
    Strategy::Lookup {
        statement: AnnualBalanceSheet,
        aliases: aliases::RETAINED_EARNINGS,
    },
    Strategy::Lookup {
        statement: QuarterlyBalanceSheet,
        aliases: aliases::RETAINED_EARNINGS,
    },
    Strategy::Derive {
        name: "equity_minus_common_stock",
        derive: derivations::retained_from_equity,
    },
];

const EBIT_CHAIN: &[Strategy] = &[
    Strategy::Lookup {
        statement: AnnualIncomeStatement,
        aliases: aliases::EBIT,
    },
    Strategy::Lookup {
        statement: QuarterlyIncomeStatement,
        aliases: aliases::EBIT,
    },
    Strategy::Derive {
        name: "net_income_plus_interest_and_taxes",
        derive: derivations::ebit_from_net_income,
    },
];

const SALES_CHAIN: &[Strategy] = &[
    Strategy::Lookup {
        statement: AnnualIncomeStatement,
        aliases: aliases::SALES,
    },
    Strategy::Lookup {
        statement: QuarterlyIncomeStatement,
        aliases: aliases::SALES,
    },
];

const MARKET_VALUE_EQUITY_CHAIN: &[Strategy] = &[
    Strategy::Info {
        key: info_keys::MARKET_CAP,
    },
    Strategy::Derive {
        name: "price_times_shares",
        derive: derivations::market_cap_from_price,
    },
];

/// Strategy chain for `quantity`. Working capital has none: it is derived
/// after the other quantities resolve.
pub const fn chain(quantity: Quantity) -> &'static [Strategy] {
    match quantity {
        Quantity::TotalAssets => TOTAL_ASSETS_CHAIN,
        Quantity::TotalLiabilities => TOTAL_LIABILITIES_CHAIN,
        Quantity::CurrentAssets => CURRENT_ASSETS_CHAIN,
        Quantity::CurrentLiabilities => CURRENT_LIABILITIES_CHAIN,
        Quantity::WorkingCapital => &[],
        Quantity::RetainedEarnings => RETAINED_EARNINGS_CHAIN,
        Quantity::Ebit => EBIT_CHAIN,
        Quantity::Sales => SALES_CHAIN,
        Quantity::MarketValueEquity => MARKET_VALUE_EQUITY_CHAIN,
    }
}

/// Get the chain length of every resolvable quantity
pub fn chain_lengths() -> HashMap<Quantity, usize> {
    Quantity::CANONICAL
        .into_iter()
        .map(|q| (q, chain(q).len()))
        .collect()
}

/// List the strategy descriptions for a quantity, in order
pub fn describe_chain(quantity: Quantity) -> Vec<String> {
    chain(quantity).iter().map(Strategy::describe).collect()
}
