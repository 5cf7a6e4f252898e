//! What was available when resolution failed.

use crate::summary::{SourceRow, render_sources, source_rows};
use altman_core::ResolutionError;
use altman_data::RawStatementSet;
use serde::{Deserialize, Serialize};

/// Diagnostics for a failed resolution: the error, every field name the
/// provider delivered, and whatever did resolve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostics {
    /// Ticker symbol.
    pub ticker: String,

    /// The failure, as shown to the user.
    pub message: String,

    /// Field names per statement, in statement order.
    pub available_fields: Vec<(String, Vec<String>)>,

    /// Quantities that did resolve.
    pub retrieved: Vec<SourceRow>,
}

impl Diagnostics {
    /// Collect diagnostics for `error` raised while resolving `raw`.
    pub fn new(raw: &RawStatementSet, error: &ResolutionError) -> Self {
        let available_fields = raw
            .available_fields()
            .into_iter()
            .map(|(kind, fields)| (kind.to_string(), fields))
            .collect();
        let retrieved = error
            .partial_provenance()
            .map(source_rows)
            .unwrap_or_default();

        Self {
            ticker: raw.ticker.clone(),
            message: error.to_string(),
            available_fields,
            retrieved,
        }
    }

    /// Yahoo Finance page with the company's statements.
    pub fn financials_url(&self) -> String {
        format!("https://finance.yahoo.com/quote/{}/financials", self.ticker)
    }

    /// Format for terminal display. The failure message itself is left to
    /// the caller.
    pub fn to_ascii(&self) -> String {
        let mut output = String::new();
        output.push_str("Data Availability Analysis:\n");
        output.push_str(&format!("  View {} on Yahoo Finance: {}\n\n", self.ticker, self.financials_url()));

        if self.available_fields.is_empty() {
            output.push_str("No financial statement fields were found.\n");
        } else {
            output.push_str("The following fields were found in the financial statements:\n");
            for (statement, fields) in &self.available_fields {
                output.push_str(&format!("  {statement}:\n    {}\n", fields.join(", ")));
            }
        }

        if !self.retrieved.is_empty() {
            output.push_str(
                "\nThese fields were successfully retrieved but not all required fields were available:\n",
            );
            output.push_str(&render_sources(&self.retrieved));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altman_core::resolve;
    use altman_data::{StatementKind, StatementTable};
    use chrono::NaiveDate;

    #[test]
    fn test_diagnostics_for_missing_fields() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let raw = RawStatementSet::new("ACME")
            .with_statement(
                StatementKind::AnnualBalanceSheet,
                StatementTable::new()
                    .with_value("Total Assets", date, 1000.0)
                    .with_value("Goodwill", date, 10.0),
            )
            .with_statement(
                StatementKind::AnnualIncomeStatement,
                StatementTable::new().with_value("Total Revenue", date, 500.0),
            );
        let error = resolve(&raw).unwrap_err();
        let diagnostics = Diagnostics::new(&raw, &error);

        assert_eq!(diagnostics.available_fields.len(), 2);
        assert_eq!(diagnostics.available_fields[0].0, "balance_sheet");
        assert_eq!(
            diagnostics.available_fields[0].1,
            vec!["Goodwill".to_string(), "Total Assets".to_string()]
        );
        assert_eq!(diagnostics.retrieved.len(), 2);

        assert!(diagnostics.message.starts_with("Missing required financial data for ACME"));

        let text = diagnostics.to_ascii();
        assert!(text.contains("Goodwill, Total Assets"));
        assert!(text.contains("https://finance.yahoo.com/quote/ACME/financials"));
        assert!(text.contains("successfully retrieved"));
    }

    #[test]
    fn test_diagnostics_without_data() {
        let raw = RawStatementSet::new("NOPE");
        let error = resolve(&raw).unwrap_err();
        let text = Diagnostics::new(&raw, &error).to_ascii();
        assert!(text.contains("No financial statement fields were found."));
        assert!(!text.contains("successfully retrieved"));
    }
}
