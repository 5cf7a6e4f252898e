#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/altman/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod lookup;

// Re-export main types from sub-crates
pub use altman_core as core;
pub use altman_data as data;
pub use altman_output as output;

pub use analysis::{Analysis, AnalysisError, AnalysisRequest, Analyzer};
pub use lookup::{CompanySearch, PopularSymbols, SymbolSource};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
