//! Export of the historical series.
//!
//! This module provides CSV and JSON export of historical Z-Scores and their
//! ratios, one row per fiscal year.

use altman_core::HistoricalPoint;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Infer the format from a file extension. JSON files are pretty-printed.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Self::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(format!(
                "unsupported extension {:?} (expected .csv or .json)",
                other.unwrap_or("")
            ))),
        }
    }
}

/// One exported year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRow {
    /// Ticker symbol.
    pub ticker: String,

    /// Fiscal year.
    pub year: i32,

    /// Balance-sheet period.
    pub date: NaiveDate,

    /// The score.
    pub z_score: f64,

    /// X1
    pub working_capital_ratio: f64,

    /// X2
    pub retained_earnings_ratio: f64,

    /// X3
    pub ebit_ratio: f64,

    /// X4
    pub market_equity_ratio: f64,

    /// X5
    pub sales_ratio: f64,
}

impl HistoryRow {
    /// Create a row from a historical point.
    pub fn new(ticker: &str, point: &HistoricalPoint) -> Self {
        Self {
            ticker: ticker.to_string(),
            year: point.year,
            date: point.period,
            z_score: point.z_score,
            working_capital_ratio: point.ratios.working_capital_to_assets,
            retained_earnings_ratio: point.ratios.retained_earnings_to_assets,
            ebit_ratio: point.ratios.ebit_to_assets,
            market_equity_ratio: point.ratios.market_equity_to_liabilities,
            sales_ratio: point.ratios.sales_to_assets,
        }
    }
}

/// The historical series of one company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryExport {
    /// Ticker symbol.
    pub ticker: String,

    /// One row per year, oldest first.
    pub rows: Vec<HistoryRow>,
}

impl HistoryExport {
    /// Create an export from a series.
    pub fn new(ticker: &str, points: &[HistoricalPoint]) -> Self {
        Self {
            ticker: ticker.to_string(),
            rows: points.iter().map(|p| HistoryRow::new(ticker, p)).collect(),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn rows_to_csv(rows: &[HistoryRow]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

impl Exporter for HistoryExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => rows_to_csv(&self.rows),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<HistoryRow> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => rows_to_csv(self),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
