//! One company's analysis as an explicit request and response.
//!
//! An [`Analyzer`] fetches the raw statements through a
//! [`StatementProvider`], then resolves the current figures, scores them and
//! builds the historical series over the same snapshot. Nothing is kept
//! between requests.

use altman_core::{
    CanonicalFinancials, FieldResolver, HistoricalPoint, HistoryError, OverrideTable,
    ResolutionError, ScoreError, SeriesBuilder, SeriesConfig, ZScore,
};
use altman_core::history::{DEFAULT_MAX_PAIRING_GAP_DAYS, DEFAULT_MAX_YEARS};
use altman_data::provider::DEFAULT_TIMEOUT;
use altman_data::{DataError, RawStatementSet, StatementProvider, fetch_with_timeout};
use altman_output::{Report, ReportBuilder, ReportError};
use std::time::Duration;
use thiserror::Error;

/// Errors that end an analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Fetching failed or timed out.
    #[error(transparent)]
    Data(#[from] DataError),

    /// The current figures could not be resolved.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The resolved figures could not be scored.
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// What to analyze and how.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Ticker symbol, normalized to upper case.
    pub ticker: String,
    /// Most recent years kept in the series; 0 keeps all.
    pub max_years: usize,
    /// Apply the built-in manual overrides.
    pub use_overrides: bool,
    /// Deadline for the fetch.
    pub timeout: Duration,
}

impl AnalysisRequest {
    /// Create a request with default settings.
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            max_years: DEFAULT_MAX_YEARS,
            use_overrides: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set how many years the series keeps.
    pub const fn with_max_years(mut self, max_years: usize) -> Self {
        self.max_years = max_years;
        self
    }

    /// Disable the manual overrides.
    pub const fn without_overrides(mut self) -> Self {
        self.use_overrides = false;
        self
    }

    /// Set the fetch deadline.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolver configured for this request.
    pub fn resolver(&self) -> FieldResolver {
        if self.use_overrides {
            FieldResolver::new()
        } else {
            FieldResolver::with_overrides(OverrideTable::empty())
        }
    }

    /// Series builder configured for this request.
    pub const fn series_builder(&self) -> SeriesBuilder {
        SeriesBuilder::new(SeriesConfig {
            max_years: self.max_years,
            max_pairing_gap_days: DEFAULT_MAX_PAIRING_GAP_DAYS,
        })
    }
}

/// The result of one analysis.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Resolved current figures with provenance.
    pub financials: CanonicalFinancials,
    /// Current-period score.
    pub z_score: ZScore,
    /// Historical series, or why there is none. Never fatal.
    pub history: Result<Vec<HistoricalPoint>, HistoryError>,
}

impl Analysis {
    /// Analyze an already fetched snapshot.
    pub fn evaluate(request: &AnalysisRequest, raw: &RawStatementSet) -> Result<Self, AnalysisError> {
        let financials = request.resolver().resolve(raw)?;
        let z_score = financials.z_score()?;

        let history = request.series_builder().build(raw);
        if let Err(e) = &history {
            tracing::warn!(ticker = %raw.ticker, error = %e, "historical series unavailable");
        }

        tracing::info!(
            ticker = %raw.ticker,
            z_score = z_score.score,
            category = %z_score.category,
            "analysis complete"
        );
        Ok(Self {
            financials,
            z_score,
            history,
        })
    }

    /// Historical points, empty when the series is unavailable.
    pub fn history_points(&self) -> &[HistoricalPoint] {
        self.history.as_deref().unwrap_or_default()
    }

    /// Build the JSON report of this analysis.
    pub fn report(&self) -> Result<Report, ReportError> {
        let builder = ReportBuilder::new()
            .financials(self.financials.clone())
            .z_score(self.z_score);
        let builder = match &self.history {
            Ok(points) => builder.history(points.clone()),
            Err(e) => builder.history_note(e.to_string()),
        };
        builder.build()
    }
}

/// Runs analyses against a statement provider.
#[derive(Debug)]
pub struct Analyzer<P> {
    provider: P,
}

impl<P: StatementProvider> Analyzer<P> {
    /// Create an analyzer over `provider`.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get the underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch the raw snapshot for a request, bounded by its timeout.
    pub async fn fetch(&self, request: &AnalysisRequest) -> Result<RawStatementSet, AnalysisError> {
        Ok(fetch_with_timeout(&self.provider, &request.ticker, request.timeout).await?)
    }

    /// Fetch and evaluate. Resolution never runs when the fetch fails.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Analysis, AnalysisError> {
        let raw = self.fetch(request).await?;
        Analysis::evaluate(request, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altman_core::Quantity;
    use altman_data::{CompanyInfo, StatementKind, StatementTable, info_keys};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn date(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 12, 31).unwrap()
    }

    fn balance(year: i32) -> StatementTable {
        StatementTable::new()
            .with_value("Total Assets", date(year), 1000.0)
            .with_value("Total Liab", date(year), 400.0)
            .with_value("Total Current Assets", date(year), 300.0)
            .with_value("Total Current Liabilities", date(year), 100.0)
            .with_value("Retained Earnings", date(year), 150.0)
    }

    fn income(year: i32) -> StatementTable {
        StatementTable::new()
            .with_value("Ebit", date(year), 120.0)
            .with_value("Total Revenue", date(year), 500.0)
    }

    struct FixtureProvider {
        statements: RawStatementSet,
        info: CompanyInfo,
        calls: AtomicUsize,
    }

    impl FixtureProvider {
        fn new(statements: RawStatementSet) -> Self {
            Self {
                statements,
                info: CompanyInfo::new()
                    .with(info_keys::MARKET_CAP, 800.0)
                    .with(info_keys::LONG_NAME, "Acme Corporation"),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl StatementProvider for FixtureProvider {
        async fn fetch_statements(&self, _ticker: &str) -> altman_data::Result<RawStatementSet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.statements.clone())
        }

        async fn fetch_company_info(&self, _ticker: &str) -> altman_data::Result<CompanyInfo> {
            Ok(self.info.clone())
        }
    }

    struct StalledProvider;

    impl StatementProvider for StalledProvider {
        async fn fetch_statements(&self, ticker: &str) -> altman_data::Result<RawStatementSet> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(RawStatementSet::new(ticker))
        }

        async fn fetch_company_info(&self, _ticker: &str) -> altman_data::Result<CompanyInfo> {
            Ok(CompanyInfo::new())
        }
    }

    fn acme() -> RawStatementSet {
        RawStatementSet::new("ACME")
            .with_statement(StatementKind::AnnualBalanceSheet, balance(2023))
            .with_statement(StatementKind::AnnualIncomeStatement, income(2023))
    }

    #[tokio::test]
    async fn test_analyze_end_to_end() {
        let analyzer = Analyzer::new(FixtureProvider::new(acme()));
        let analysis = analyzer.analyze(&AnalysisRequest::new("acme")).await.unwrap();

        assert_eq!(analysis.financials.company_name, "Acme Corporation");
        assert!((analysis.z_score.score - 2.5455).abs() < 1e-4);
        assert_eq!(analysis.history_points().len(), 1);
        assert_eq!(analyzer.provider().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_income_statement_is_resolution_error() {
        let raw = RawStatementSet::new("ACME").with_statement(
            StatementKind::AnnualBalanceSheet,
            StatementTable::new().with_value("Total Assets", date(2023), 1000.0),
        );
        let analyzer = Analyzer::new(FixtureProvider::new(raw));
        let err = analyzer.analyze(&AnalysisRequest::new("ACME")).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Resolution(ResolutionError::NoPeriodData { .. })));
    }

    #[tokio::test]
    async fn test_timeout_never_resolves() {
        let analyzer = Analyzer::new(StalledProvider);
        let request = AnalysisRequest::new("SLOW").with_timeout(Duration::from_millis(10));
        let err = analyzer.analyze(&request).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Data(DataError::Timeout { .. })));
    }

    #[test]
    fn test_history_failure_is_not_fatal() {
        // Income period too far from the balance sheet to pair.
        let early = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        let raw = RawStatementSet::new("ACME")
            .with_statement(StatementKind::AnnualBalanceSheet, balance(2023))
            .with_statement(
                StatementKind::AnnualIncomeStatement,
                StatementTable::new()
                    .with_value("Ebit", early, 120.0)
                    .with_value("Total Revenue", early, 500.0),
            )
            .with_info(CompanyInfo::new().with(info_keys::MARKET_CAP, 800.0));

        let analysis = Analysis::evaluate(&AnalysisRequest::new("ACME"), &raw).unwrap();
        assert!(matches!(analysis.history, Err(HistoryError::Unavailable { .. })));
        assert!(analysis.history_points().is_empty());

        let report = analysis.report().unwrap();
        assert_eq!(
            report.history_note.as_deref(),
            Some("Could not calculate historical Z-Scores for ACME")
        );
    }

    #[test]
    fn test_overrides_can_be_disabled() {
        let raw = RawStatementSet::new("AAPL")
            .with_statement(StatementKind::AnnualBalanceSheet, balance(2023))
            .with_statement(StatementKind::AnnualIncomeStatement, income(2023))
            .with_info(CompanyInfo::new().with(info_keys::MARKET_CAP, 800.0));

        let with = Analysis::evaluate(&AnalysisRequest::new("AAPL"), &raw).unwrap();
        assert_eq!(with.financials.value(Quantity::CurrentAssets), 143.6e9);

        let without =
            Analysis::evaluate(&AnalysisRequest::new("AAPL").without_overrides(), &raw).unwrap();
        assert_eq!(without.financials.value(Quantity::CurrentAssets), 300.0);
    }

    #[test]
    fn test_request_defaults() {
        let request = AnalysisRequest::new("  msft ");
        assert_eq!(request.ticker, "MSFT");
        assert_eq!(request.max_years, 5);
        assert!(request.use_overrides);
        assert_eq!(request.with_max_years(0).max_years, 0);
    }
}
