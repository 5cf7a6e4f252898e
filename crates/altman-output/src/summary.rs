//! Score summary and data-source tables.
//!
//! This module renders the current-period analysis for the terminal: the
//! resolved figures, the Z-Score with its interpretation, the weighted
//! components, and where every figure came from.

use crate::format::{format_currency, format_ratio};
use altman_core::{CanonicalFinancials, Component, ProvenanceMap, Quantity, RiskCategory, ZScore};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

const RULE_WIDTH: usize = 80;

/// One row of the data-source table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRow {
    /// Metric name, e.g. `"Total Assets"`.
    pub metric: String,

    /// Field name or derivation description.
    pub source: String,

    /// Period the value refers to.
    pub date: String,

    /// Kind of source.
    pub source_type: String,
}

/// Flatten a provenance map into table rows, in display order.
pub fn source_rows(provenance: &ProvenanceMap) -> Vec<SourceRow> {
    provenance
        .iter()
        .map(|(quantity, p)| SourceRow {
            metric: quantity.display_name().to_string(),
            source: p.source.clone(),
            date: p.period.to_string(),
            source_type: p.kind.to_string(),
        })
        .collect()
}

/// Render source rows as an ASCII table.
pub fn render_sources(rows: &[SourceRow]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<22} {:<40} {:<12} {}\n",
        "Metric", "Source", "Date", "Source Type"
    ));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');
    for row in rows {
        output.push_str(&format!(
            "{:<22} {:<40} {:<12} {}\n",
            row.metric, row.source, row.date, row.source_type
        ));
    }
    output
}

/// Current-period analysis for one company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreSummary {
    /// Company name.
    pub company_name: String,

    /// Ticker symbol.
    pub ticker: String,

    /// Balance-sheet period the figures refer to.
    pub report_date: NaiveDate,

    /// Figures in display order.
    pub figures: Vec<(String, f64)>,

    /// The score.
    pub z_score: f64,

    /// Risk classification.
    pub category: RiskCategory,

    /// Weighted components.
    pub components: Vec<Component>,

    /// Data sources.
    pub sources: Vec<SourceRow>,
}

impl ScoreSummary {
    /// Build a summary from resolved financials and their score.
    pub fn new(financials: &CanonicalFinancials, z: &ZScore) -> Self {
        let figures = Quantity::ALL
            .into_iter()
            .map(|q| (figure_label(q).to_string(), financials.value(q)))
            .collect();

        Self {
            company_name: financials.company_name.clone(),
            ticker: financials.ticker.clone(),
            report_date: financials.report_date,
            figures,
            z_score: z.score,
            category: z.category,
            components: z.ratios.components(),
            sources: source_rows(&financials.provenance),
        }
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\nFinancial Data for {} ({})\n",
            self.company_name, self.ticker
        ));
        output.push_str(&format!("Report Date: {}\n", self.report_date));
        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push('\n');

        for (label, value) in &self.figures {
            output.push_str(&format!(
                "  {:<26} {:>14}\n",
                label,
                format_currency(Some(*value))
            ));
        }

        output.push_str("\nZ-Score Results:\n");
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        output.push_str(&format!("  Altman-Z Score:  {:.2}\n", self.z_score));
        output.push_str(&format!("  Risk Assessment: {}\n", self.category));
        output.push_str(&format!(
            "  {}: {}\n",
            self.category.zone(),
            self.category.explanation()
        ));

        output.push_str("\nZ-Score Components:\n");
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        output.push_str(&render_components(&self.components));

        output.push_str("\nData Source Details:\n");
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        output.push_str(&render_sources(&self.sources));

        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push('\n');
        output
    }
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): Z = {:.2}, {}",
            self.company_name, self.ticker, self.z_score, self.category
        )
    }
}

/// Render the components table: ratio, raw value, weighted value.
pub fn render_components(components: &[Component]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<50} {:>12} {:>14}\n",
        "Component", "Value", "Weighted Value"
    ));
    for component in components {
        output.push_str(&format!(
            "{:<50} {:>12} {:>14}\n",
            component.label,
            format_ratio(component.value),
            format_ratio(component.contribution)
        ));
    }
    output
}

/// Label used for a figure in the summary.
const fn figure_label(quantity: Quantity) -> &'static str {
    match quantity {
        Quantity::Sales => "Sales/Revenue",
        Quantity::MarketValueEquity => "Market Value of Equity",
        other => other.display_name(),
    }
}
