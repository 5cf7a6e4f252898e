#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/altman/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod diagnostics;
pub mod export;
pub mod format;
pub mod report;
pub mod summary;

pub use chart::TrendChart;
pub use diagnostics::Diagnostics;
pub use export::{ExportError, ExportFormat, Exporter, HistoryExport, HistoryRow};
pub use format::{format_currency, format_ratio};
pub use report::{Report, ReportBuilder, ReportError};
pub use summary::{ScoreSummary, SourceRow, render_components, render_sources, source_rows};
