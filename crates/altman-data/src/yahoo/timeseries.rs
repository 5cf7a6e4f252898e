//! Parsing of the Yahoo Finance fundamentals timeseries endpoint.
//!
//! The endpoint is keyed by CamelCase concept names (`TotalAssets`,
//! `TotalLiabilitiesNetMinorityInterest`, ...) prefixed with the reporting
//! frequency (`annual`, `quarterly`). Tables are stored under the classic
//! statement labels (`"Total Assets"`, `"Total Liab"`, ...) so the same field
//! names work for every provider; concepts without a classic label keep
//! their Yahoo key.

use crate::error::{DataError, Result};
use crate::statements::StatementTable;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

/// Reporting frequency of a timeseries request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Fiscal-year statements
    Annual,
    /// Fiscal-quarter statements
    Quarterly,
}

impl Frequency {
    /// Key prefix used by the endpoint.
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }
}

/// Balance-sheet concepts requested, with the label they are stored under.
pub const BALANCE_SHEET_FIELDS: &[(&str, &str)] = &[
    ("TotalAssets", "Total Assets"),
    ("TotalLiabilitiesNetMinorityInterest", "Total Liab"),
    ("StockholdersEquity", "Total Stockholder Equity"),
    ("CurrentAssets", "Total Current Assets"),
    ("CurrentLiabilities", "Total Current Liabilities"),
    ("RetainedEarnings", "Retained Earnings"),
    ("CommonStock", "Common Stock"),
    ("CashAndCashEquivalents", "Cash And Cash Equivalents"),
    ("OtherShortTermInvestments", "Short Term Investments"),
    ("Receivables", "Net Receivables"),
    ("Inventory", "Inventory"),
    ("OtherCurrentAssets", "Other Current Assets"),
    ("AccountsPayable", "Accounts Payable"),
    ("CurrentDebt", "Short Term Debt"),
    ("CurrentAccruedExpenses", "Accrued Liabilities"),
    ("OtherCurrentLiabilities", "Other Current Liabilities"),
];

/// Income-statement concepts requested, with the label they are stored under.
pub const INCOME_STATEMENT_FIELDS: &[(&str, &str)] = &[
    ("EBIT", "Ebit"),
    ("OperatingIncome", "Operating Income"),
    ("TotalRevenue", "Total Revenue"),
    ("NetIncome", "Net Income"),
    ("InterestExpense", "Interest Expense"),
    ("TaxProvision", "Income Tax Expense"),
];

/// Fully prefixed request keys for `fields` at `frequency`.
pub fn request_types(fields: &[(&str, &str)], frequency: Frequency) -> Vec<String> {
    fields
        .iter()
        .map(|(key, _)| format!("{}{}", frequency.prefix(), key))
        .collect()
}

#[derive(Debug, Deserialize)]
struct Envelope {
    timeseries: Body,
}

#[derive(Debug, Deserialize)]
struct Body {
    #[serde(default)]
    result: Vec<SeriesResult>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SeriesResult {
    meta: SeriesMeta,
    #[serde(flatten)]
    series: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SeriesMeta {
    #[serde(rename = "type", default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataPoint {
    as_of_date: String,
    reported_value: ReportedValue,
}

#[derive(Debug, Deserialize)]
struct ReportedValue {
    raw: f64,
}

/// Parse a timeseries response into one statement table.
///
/// Keys not listed in `fields` are ignored; points that fail to parse are
/// skipped rather than failing the whole table. Period columns come out most
/// recent first.
pub fn parse_statement(
    body: &str,
    frequency: Frequency,
    fields: &[(&str, &str)],
) -> Result<StatementTable> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if let Some(error) = envelope.timeseries.error.filter(|e| !e.is_null()) {
        return Err(DataError::YahooApi(error.to_string()));
    }

    let labels: HashMap<String, &str> = fields
        .iter()
        .map(|(key, label)| (format!("{}{}", frequency.prefix(), key), *label))
        .collect();

    let mut cells: Vec<(&str, NaiveDate, f64)> = Vec::new();
    for result in &envelope.timeseries.result {
        for key in &result.meta.types {
            let Some(&label) = labels.get(key) else {
                continue;
            };
            let Some(raw_points) = result.series.get(key) else {
                continue;
            };
            let points: Vec<Option<DataPoint>> = match serde_json::from_value(raw_points.clone())
            {
                Ok(points) => points,
                Err(e) => {
                    tracing::warn!(%key, error = %e, "skipping unparseable timeseries");
                    continue;
                }
            };
            for point in points.into_iter().flatten() {
                match NaiveDate::parse_from_str(&point.as_of_date, "%Y-%m-%d") {
                    Ok(date) => cells.push((label, date, point.reported_value.raw)),
                    Err(_) => tracing::warn!(%key, date = %point.as_of_date, "bad asOfDate"),
                }
            }
        }
    }

    let mut periods: Vec<NaiveDate> = cells.iter().map(|(_, date, _)| *date).collect();
    periods.sort_unstable_by(|a, b| b.cmp(a));
    periods.dedup();

    let mut table = StatementTable::new();
    for period in periods {
        table.add_period(period);
    }
    for (label, date, value) in cells {
        table.insert(label, date, value);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
      "timeseries": {
        "result": [
          {
            "meta": {"symbol": ["ACME"], "type": ["annualTotalAssets"]},
            "timestamp": [1640908800, 1672444800],
            "annualTotalAssets": [
              {"dataId": 20976, "asOfDate": "2021-12-31", "periodType": "12M", "currencyCode": "USD",
               "reportedValue": {"raw": 900.0, "fmt": "900"}},
              null,
              {"dataId": 20976, "asOfDate": "2022-12-31", "periodType": "12M", "currencyCode": "USD",
               "reportedValue": {"raw": 1000.0, "fmt": "1K"}}
            ]
          },
          {
            "meta": {"symbol": ["ACME"], "type": ["annualTotalLiabilitiesNetMinorityInterest"]},
            "timestamp": [1672444800],
            "annualTotalLiabilitiesNetMinorityInterest": [
              {"asOfDate": "2022-12-31", "reportedValue": {"raw": 400.0}}
            ]
          },
          {
            "meta": {"symbol": ["ACME"], "type": ["annualRetainedEarnings"]}
          },
          {
            "meta": {"symbol": ["ACME"], "type": ["annualSomethingElse"]},
            "annualSomethingElse": [{"asOfDate": "2022-12-31", "reportedValue": {"raw": 1.0}}]
          }
        ],
        "error": null
      }
    }"#;

    #[test]
    fn test_parse_statement_maps_labels() {
        let table = parse_statement(SAMPLE, Frequency::Annual, BALANCE_SHEET_FIELDS).unwrap();
        let latest = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();

        assert_eq!(table.value("Total Assets", latest), Some(1000.0));
        assert_eq!(table.value("Total Liab", latest), Some(400.0));
        assert!(!table.has_field("Retained Earnings"));
        assert!(!table.has_field("SomethingElse"));
    }

    #[test]
    fn test_parse_statement_orders_periods_most_recent_first() {
        let table = parse_statement(SAMPLE, Frequency::Annual, BALANCE_SHEET_FIELDS).unwrap();
        assert_eq!(
            table.periods(),
            &[
                NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
                NaiveDate::from_ymd_opt(2021, 12, 31).unwrap(),
            ]
        );
    }

    #[test]
    fn test_wrong_frequency_yields_empty_table() {
        let table = parse_statement(SAMPLE, Frequency::Quarterly, BALANCE_SHEET_FIELDS).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_error_payload_is_surfaced() {
        let body = r#"{"timeseries": {"result": [], "error": {"code": "Not Found"}}}"#;
        let result = parse_statement(body, Frequency::Annual, BALANCE_SHEET_FIELDS);
        assert!(matches!(result, Err(DataError::YahooApi(_))));
    }

    #[test]
    fn test_malformed_body_is_a_serialization_error() {
        let result = parse_statement("<html>", Frequency::Annual, BALANCE_SHEET_FIELDS);
        assert!(matches!(result, Err(DataError::Serialization(_))));
    }

    #[test]
    fn test_request_types_are_prefixed() {
        let types = request_types(INCOME_STATEMENT_FIELDS, Frequency::Quarterly);
        assert_eq!(types[0], "quarterlyEBIT");
        assert_eq!(types.len(), INCOME_STATEMENT_FIELDS.len());
    }
}
