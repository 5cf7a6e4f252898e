//! Declarative resolution strategies and the context they run against.

use crate::provenance::Provenance;
use crate::quantity::Quantity;
use altman_data::{RawStatementSet, StatementKind};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Both balance sheets, annual first.
pub const BALANCE_SHEETS: [StatementKind; 2] = [
    StatementKind::AnnualBalanceSheet,
    StatementKind::QuarterlyBalanceSheet,
];

/// Both income statements, annual first.
pub const INCOME_STATEMENTS: [StatementKind; 2] = [
    StatementKind::AnnualIncomeStatement,
    StatementKind::QuarterlyIncomeStatement,
];

/// A derivation: computes a value from the context, or declines.
pub type Derivation = fn(&ResolutionContext<'_>) -> Option<Resolved>;

/// One step in a quantity's resolution chain.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    /// First alias with a value in the latest period of `statement`.
    Lookup {
        /// Table to search
        statement: StatementKind,
        /// Field names, in preference order
        aliases: &'static [&'static str],
    },
    /// A numeric key of the company-info record.
    Info {
        /// Info key
        key: &'static str,
    },
    /// A computation over other fields or already-resolved quantities.
    Derive {
        /// Short name used in logs
        name: &'static str,
        /// The computation
        derive: Derivation,
    },
}

impl Strategy {
    /// Run the strategy. `None` means "try the next one".
    pub fn evaluate(&self, ctx: &ResolutionContext<'_>) -> Option<Resolved> {
        match self {
            Self::Lookup { statement, aliases } => {
                ctx.lookup(*statement, aliases).map(Observation::into_resolved)
            }
            Self::Info { key } => ctx.raw.info.number(key).map(|value| Resolved {
                value,
                provenance: Provenance::info(*key),
            }),
            Self::Derive { derive, .. } => derive(ctx),
        }
    }

    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Lookup { statement, .. } => format!("lookup:{statement}"),
            Self::Info { key } => format!("info:{key}"),
            Self::Derive { name, .. } => format!("derive:{name}"),
        }
    }
}

/// A value produced by a strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The value
    pub value: f64,
    /// Where it came from
    pub provenance: Provenance,
}

/// A single statement cell that matched an alias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Alias that matched
    pub field: &'static str,
    /// Table it was found in
    pub statement: StatementKind,
    /// Period column
    pub period: NaiveDate,
    /// Cell value
    pub value: f64,
}

impl Observation {
    /// Turn a direct read into a resolved value.
    pub fn into_resolved(self) -> Resolved {
        Resolved {
            value: self.value,
            provenance: Provenance::field(self.field, self.statement, self.period),
        }
    }
}

/// Read-only view the strategies run against.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    /// The statements being resolved
    pub raw: &'a RawStatementSet,
    /// Quantities resolved so far
    pub resolved: &'a BTreeMap<Quantity, f64>,
}

impl<'a> ResolutionContext<'a> {
    /// Create a context.
    pub const fn new(raw: &'a RawStatementSet, resolved: &'a BTreeMap<Quantity, f64>) -> Self {
        Self { raw, resolved }
    }

    /// Latest period of `statement`.
    pub fn period(&self, statement: StatementKind) -> Option<NaiveDate> {
        self.raw.statement(statement).latest_period()
    }

    /// Latest balance-sheet period, annual preferred.
    pub fn balance_sheet_period(&self) -> Option<NaiveDate> {
        BALANCE_SHEETS.into_iter().find_map(|kind| self.period(kind))
    }

    /// First alias with a value in the latest period of `statement`.
    pub fn lookup(
        &self,
        statement: StatementKind,
        aliases: &[&'static str],
    ) -> Option<Observation> {
        let period = self.period(statement)?;
        let (field, value) = self.raw.statement(statement).first_value(aliases, period)?;
        Some(Observation {
            field,
            statement,
            period,
            value,
        })
    }

    /// [`lookup`](Self::lookup) over several statements, first hit wins.
    pub fn lookup_any(
        &self,
        statements: &[StatementKind],
        aliases: &[&'static str],
    ) -> Option<Observation> {
        statements
            .iter()
            .find_map(|statement| self.lookup(*statement, aliases))
    }

    /// An already-resolved quantity.
    pub fn resolved(&self, quantity: Quantity) -> Option<f64> {
        self.resolved.get(&quantity).copied()
    }
}
