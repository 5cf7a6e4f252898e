#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/altman/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod provider;
pub mod statements;
pub mod yahoo;

pub use error::{DataError, Result};
pub use provider::{FetchConfig, StatementProvider, fetch_with_timeout};
pub use statements::{
    CompanyInfo, InfoValue, RawStatementSet, StatementKind, StatementTable, info_keys,
};
pub use yahoo::{SymbolMatch, YahooProvider, YahooSymbolSearch};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
