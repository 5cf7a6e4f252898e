//! Where each resolved value came from.

use crate::quantity::Quantity;
use altman_data::StatementKind;
use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Provenance of every quantity that was resolved, keyed by quantity.
pub type ProvenanceMap = BTreeMap<Quantity, Provenance>;

/// Source name used for manual overrides.
pub const MANUAL_OVERRIDE: &str = "Manual override";

/// Kind of source a value was taken from.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A statement table
    #[display("{_0}")]
    Statement(StatementKind),
    /// The company-info record
    #[display("ticker.info")]
    CompanyInfo,
    /// Computed from other figures
    #[display("calculated")]
    Calculated,
    /// Built-in override table
    #[display("hardcoded")]
    Hardcoded,
}

/// The reporting period a value refers to.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodRef {
    /// A statement period column
    #[display("{}", _0.format("%Y-%m-%d"))]
    Date(NaiveDate),
    /// The most recent period, whatever it is
    #[display("latest")]
    Latest,
    /// A live figure such as market capitalization
    #[display("current")]
    Current,
    /// Derived values without a single period
    #[display("N/A")]
    NotApplicable,
}

/// Source name, period and source kind of one resolved value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Field name that matched, or a description of the derivation
    pub source: String,
    /// Period the value refers to
    pub period: PeriodRef,
    /// Where the value came from
    pub kind: SourceKind,
}

impl Provenance {
    /// Value read directly from a statement column.
    pub fn field(name: impl Into<String>, statement: StatementKind, period: NaiveDate) -> Self {
        Self {
            source: name.into(),
            period: PeriodRef::Date(period),
            kind: SourceKind::Statement(statement),
        }
    }

    /// Value read from the company-info record.
    pub fn info(key: impl Into<String>) -> Self {
        Self {
            source: key.into(),
            period: PeriodRef::Current,
            kind: SourceKind::CompanyInfo,
        }
    }

    /// Value computed from other figures.
    pub fn calculated(description: impl Into<String>, period: PeriodRef) -> Self {
        Self {
            source: description.into(),
            period,
            kind: SourceKind::Calculated,
        }
    }

    /// Value taken from the override table.
    pub fn hardcoded() -> Self {
        Self {
            source: MANUAL_OVERRIDE.to_string(),
            period: PeriodRef::Latest,
            kind: SourceKind::Hardcoded,
        }
    }

    /// Whether the value was computed rather than read.
    pub const fn is_calculated(&self) -> bool {
        matches!(self.kind, SourceKind::Calculated)
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.source, self.period, self.kind)
    }
}
