//! JSON report of one analysis.

use altman_core::{CanonicalFinancials, Component, HistoricalPoint, ZScore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required part was not supplied to the builder.
    #[error("Missing report field: {0}")]
    Missing(&'static str),
}

/// A complete analysis of one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Ticker symbol.
    pub ticker: String,

    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Resolved figures with provenance.
    pub financials: CanonicalFinancials,

    /// Current-period score.
    pub z_score: ZScore,

    /// Interpretation of the score.
    pub explanation: String,

    /// Weighted components.
    pub components: Vec<Component>,

    /// Historical scores, oldest first. Empty when unavailable.
    pub history: Vec<HistoricalPoint>,

    /// Why the history is empty, when it is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_note: Option<String>,
}

impl Report {
    /// Create a new report.
    pub fn new(financials: CanonicalFinancials, z_score: ZScore) -> Self {
        Self {
            ticker: financials.ticker.clone(),
            timestamp: Utc::now(),
            explanation: z_score.explanation().to_string(),
            components: z_score.ratios.components(),
            financials,
            z_score,
            history: Vec::new(),
            history_note: None,
        }
    }

    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    financials: Option<CanonicalFinancials>,
    z_score: Option<ZScore>,
    history: Vec<HistoricalPoint>,
    history_note: Option<String>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolved financials.
    pub fn financials(mut self, financials: CanonicalFinancials) -> Self {
        self.financials = Some(financials);
        self
    }

    /// Set the score.
    pub const fn z_score(mut self, z_score: ZScore) -> Self {
        self.z_score = Some(z_score);
        self
    }

    /// Set the historical series.
    pub fn history(mut self, history: Vec<HistoricalPoint>) -> Self {
        self.history = history;
        self
    }

    /// Note why history is missing.
    pub fn history_note(mut self, note: impl Into<String>) -> Self {
        self.history_note = Some(note.into());
        self
    }

    /// Build the report.
    pub fn build(self) -> Result<Report, ReportError> {
        let financials = self.financials.ok_or(ReportError::Missing("financials"))?;
        let z_score = self.z_score.ok_or(ReportError::Missing("z_score"))?;
        Ok(Report {
            history: self.history,
            history_note: self.history_note,
            ..Report::new(financials, z_score)
        })
    }
}
