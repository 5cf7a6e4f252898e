#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/altman/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod history;
pub mod provenance;
pub mod quantity;
pub mod registry;
pub mod resolver;
pub mod zscore;

pub use error::{HistoryError, ResolutionError, ScoreError};
pub use history::{HistoricalPoint, SeriesBuilder, SeriesConfig, build_series};
pub use provenance::{PeriodRef, Provenance, ProvenanceMap, SourceKind};
pub use quantity::Quantity;
pub use resolver::{CanonicalFinancials, FieldResolver, OverrideTable, Strategy, resolve};
pub use zscore::{
    Component, Ratios, RiskCategory, ZScore, ZScoreInputs, compute_z_score,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
