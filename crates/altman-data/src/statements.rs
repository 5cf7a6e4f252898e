//! Raw financial statement tables as delivered by a data provider.
//!
//! Field names are kept verbatim: providers do not agree on one naming scheme
//! (`"Total Liab"`, `"TotalLiab"`, `"Total Liabilities"` all occur), so the
//! tables make no attempt to normalize them. Normalization is the job of the
//! resolver in `altman-core`.

use crate::error::Result;
use chrono::NaiveDate;
use derive_more::{Display, From};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four statement tables a provider can deliver for one company.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum StatementKind {
    /// Annual balance sheet
    #[display("balance_sheet")]
    AnnualBalanceSheet,
    /// Annual income statement
    #[display("financials")]
    AnnualIncomeStatement,
    /// Quarterly balance sheet
    #[display("quarterly_balance_sheet")]
    QuarterlyBalanceSheet,
    /// Quarterly income statement
    #[display("quarterly_financials")]
    QuarterlyIncomeStatement,
}

impl StatementKind {
    /// All statement kinds, annual before quarterly.
    pub const ALL: [Self; 4] = [
        Self::AnnualBalanceSheet,
        Self::AnnualIncomeStatement,
        Self::QuarterlyBalanceSheet,
        Self::QuarterlyIncomeStatement,
    ];

    /// Human-readable title.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::AnnualBalanceSheet => "Balance Sheet",
            Self::AnnualIncomeStatement => "Income Statement",
            Self::QuarterlyBalanceSheet => "Quarterly Balance Sheet",
            Self::QuarterlyIncomeStatement => "Quarterly Income Statement",
        }
    }
}

/// One statement table: field name → period date → value.
///
/// Periods are kept in the column order the provider delivered them in
/// (most recent first for Yahoo Finance). Non-finite values are never stored,
/// so a missing cell and a `NaN` cell look the same to readers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    periods: Vec<NaiveDate>,
    rows: BTreeMap<String, BTreeMap<NaiveDate, f64>>,
}

impl StatementTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. Unknown periods are appended to the column order.
    pub fn insert(&mut self, field: impl Into<String>, period: NaiveDate, value: f64) {
        if !value.is_finite() {
            return;
        }
        if !self.periods.contains(&period) {
            self.periods.push(period);
        }
        self.rows.entry(field.into()).or_default().insert(period, value);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_value(mut self, field: impl Into<String>, period: NaiveDate, value: f64) -> Self {
        self.insert(field, period, value);
        self
    }

    /// Register a period column without any values.
    pub fn add_period(&mut self, period: NaiveDate) {
        if !self.periods.contains(&period) {
            self.periods.push(period);
        }
    }

    /// True when the table has no period columns at all.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Period columns in delivery order.
    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    /// The most recent period column.
    pub fn latest_period(&self) -> Option<NaiveDate> {
        self.periods.iter().max().copied()
    }

    /// Value of `field` at `period`.
    pub fn value(&self, field: &str, period: NaiveDate) -> Option<f64> {
        self.rows.get(field)?.get(&period).copied()
    }

    /// Whether `field` is present in any period.
    pub fn has_field(&self, field: &str) -> bool {
        self.rows.contains_key(field)
    }

    /// Field names, sorted.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// First alias that has a value at `period`, with that value.
    pub fn first_value<'a>(&self, aliases: &[&'a str], period: NaiveDate) -> Option<(&'a str, f64)> {
        aliases
            .iter()
            .find_map(|alias| self.value(alias, period).map(|v| (*alias, v)))
    }

    /// Render the table as a DataFrame with one row per field and one column per period.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let fields: Vec<&str> = self.field_names().collect();
        let mut columns: Vec<Column> = Vec::with_capacity(self.periods.len() + 1);
        columns.push(Series::new("field".into(), fields.clone()).into());

        for period in &self.periods {
            let values: Vec<Option<f64>> = fields.iter().map(|f| self.value(f, *period)).collect();
            columns.push(Series::new(period.to_string().into(), values).into());
        }

        Ok(DataFrame::new(columns)?)
    }
}

/// A scalar in the company-info record.
#[derive(Debug, Clone, PartialEq, From, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    /// Numeric value
    Number(f64),
    /// Boolean flag
    Flag(bool),
    /// Text value
    Text(String),
}

impl From<&str> for InfoValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Well-known company-info keys.
pub mod info_keys {
    /// Market capitalization
    pub const MARKET_CAP: &str = "marketCap";
    /// Last regular-session price
    pub const REGULAR_MARKET_PRICE: &str = "regularMarketPrice";
    /// Current price, used when the regular-session price is absent
    pub const CURRENT_PRICE: &str = "currentPrice";
    /// Shares outstanding
    pub const SHARES_OUTSTANDING: &str = "sharesOutstanding";
    /// Full company name
    pub const LONG_NAME: &str = "longName";
    /// Abbreviated company name
    pub const SHORT_NAME: &str = "shortName";
    /// Listing exchange
    pub const EXCHANGE: &str = "exchange";
}

/// Flat company-info record (key → scalar).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyInfo {
    values: BTreeMap<String, InfoValue>,
}

impl CompanyInfo {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<InfoValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<InfoValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.values.get(key)
    }

    /// Finite numeric value for `key`.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.values.get(key)? {
            InfoValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Non-empty text value for `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key)? {
            InfoValue::Text(s) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether the record has no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Everything a provider knows about one company at fetch time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatementSet {
    /// Ticker symbol, upper-cased
    pub ticker: String,
    /// Annual balance sheet
    pub annual_balance_sheet: StatementTable,
    /// Annual income statement
    pub annual_income_statement: StatementTable,
    /// Quarterly balance sheet
    pub quarterly_balance_sheet: StatementTable,
    /// Quarterly income statement
    pub quarterly_income_statement: StatementTable,
    /// Company-info record
    pub info: CompanyInfo,
}

impl RawStatementSet {
    /// Create an empty set for `ticker`.
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            ..Self::default()
        }
    }

    /// Table for `kind`.
    pub const fn statement(&self, kind: StatementKind) -> &StatementTable {
        match kind {
            StatementKind::AnnualBalanceSheet => &self.annual_balance_sheet,
            StatementKind::AnnualIncomeStatement => &self.annual_income_statement,
            StatementKind::QuarterlyBalanceSheet => &self.quarterly_balance_sheet,
            StatementKind::QuarterlyIncomeStatement => &self.quarterly_income_statement,
        }
    }

    /// Mutable table for `kind`.
    pub const fn statement_mut(&mut self, kind: StatementKind) -> &mut StatementTable {
        match kind {
            StatementKind::AnnualBalanceSheet => &mut self.annual_balance_sheet,
            StatementKind::AnnualIncomeStatement => &mut self.annual_income_statement,
            StatementKind::QuarterlyBalanceSheet => &mut self.quarterly_balance_sheet,
            StatementKind::QuarterlyIncomeStatement => &mut self.quarterly_income_statement,
        }
    }

    /// Replace the table for `kind`.
    pub fn with_statement(mut self, kind: StatementKind, table: StatementTable) -> Self {
        *self.statement_mut(kind) = table;
        self
    }

    /// Replace the company-info record.
    pub fn with_info(mut self, info: CompanyInfo) -> Self {
        self.info = info;
        self
    }

    /// Company name from the info record, falling back to the ticker.
    pub fn company_name(&self) -> &str {
        self.info
            .text(info_keys::LONG_NAME)
            .unwrap_or(self.ticker.as_str())
    }

    /// Field names of every non-empty statement, for diagnostics.
    pub fn available_fields(&self) -> BTreeMap<StatementKind, Vec<String>> {
        StatementKind::ALL
            .into_iter()
            .filter(|kind| !self.statement(*kind).is_empty())
            .map(|kind| {
                let names = self.statement(kind).field_names().map(str::to_string).collect();
                (kind, names)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_table_keeps_delivery_order() {
        let table = StatementTable::new()
            .with_value("Total Assets", date(2023, 9, 30), 352.0)
            .with_value("Total Assets", date(2022, 9, 24), 351.0)
            .with_value("Total Assets", date(2024, 9, 28), 365.0);

        assert_eq!(
            table.periods(),
            &[date(2023, 9, 30), date(2022, 9, 24), date(2024, 9, 28)]
        );
        assert_eq!(table.latest_period(), Some(date(2024, 9, 28)));
    }

    #[test]
    fn test_kind_titles_and_keys() {
        assert_eq!(StatementKind::AnnualBalanceSheet.title(), "Balance Sheet");
        assert_eq!(
            StatementKind::QuarterlyIncomeStatement.title(),
            "Quarterly Income Statement"
        );
        assert_eq!(StatementKind::AnnualIncomeStatement.to_string(), "financials");
    }

    #[test]
    fn test_non_finite_values_are_dropped() {
        let table = StatementTable::new()
            .with_value("Inventory", date(2023, 12, 31), f64::NAN)
            .with_value("Cash", date(2023, 12, 31), 10.0);

        assert!(!table.has_field("Inventory"));
        assert_eq!(table.value("Cash", date(2023, 12, 31)), Some(10.0));
    }

    #[test]
    fn test_first_value_respects_alias_order() {
        let period = date(2023, 12, 31);
        let table = StatementTable::new()
            .with_value("TotalLiab", period, 2.0)
            .with_value("Total Liabilities", period, 3.0);

        let hit = table.first_value(&["Total Liab", "TotalLiab", "Total Liabilities"], period);
        assert_eq!(hit, Some(("TotalLiab", 2.0)));
        assert_eq!(table.first_value(&["Nope"], period), None);
    }

    #[test]
    fn test_company_info_accessors() {
        let info = CompanyInfo::new()
            .with(info_keys::MARKET_CAP, 1.5e12)
            .with(info_keys::LONG_NAME, "Apple Inc.")
            .with("bogus", f64::INFINITY);

        assert_eq!(info.number(info_keys::MARKET_CAP), Some(1.5e12));
        assert_eq!(info.text(info_keys::LONG_NAME), Some("Apple Inc."));
        assert_eq!(info.number("bogus"), None);
        assert_eq!(info.number(info_keys::LONG_NAME), None);
    }

    #[test]
    fn test_company_name_falls_back_to_ticker() {
        let raw = RawStatementSet::new(" msft ");
        assert_eq!(raw.ticker, "MSFT");
        assert_eq!(raw.company_name(), "MSFT");
    }

    #[test]
    fn test_available_fields_skips_empty_statements() {
        let raw = RawStatementSet::new("XYZ").with_statement(
            StatementKind::QuarterlyBalanceSheet,
            StatementTable::new().with_value("Total Assets", date(2024, 3, 31), 1.0),
        );

        let fields = raw.available_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields.get(&StatementKind::QuarterlyBalanceSheet),
            Some(&vec!["Total Assets".to_string()])
        );
    }

    #[test]
    fn test_to_dataframe_shape() {
        let table = StatementTable::new()
            .with_value("Total Assets", date(2023, 12, 31), 1.0)
            .with_value("Total Liab", date(2022, 12, 31), 2.0);

        let df = table.to_dataframe().unwrap();
        assert_eq!(df.shape(), (2, 3));
    }

    #[test]
    fn test_info_round_trips_through_json() {
        let info = CompanyInfo::new()
            .with(info_keys::MARKET_CAP, 10.0)
            .with(info_keys::EXCHANGE, "NMS");
        let json = serde_json::to_string(&info).unwrap();
        let back: CompanyInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
