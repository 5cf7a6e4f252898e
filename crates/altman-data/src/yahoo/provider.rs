//! [`StatementProvider`] backed by Yahoo Finance.

use super::client::YahooClient;
use super::quote::parse_company_info;
use super::timeseries::{
    BALANCE_SHEET_FIELDS, Frequency, INCOME_STATEMENT_FIELDS, parse_statement, request_types,
};
use crate::error::Result;
use crate::provider::{FetchConfig, StatementProvider};
use crate::statements::{CompanyInfo, RawStatementSet, StatementKind, info_keys};
use chrono::{Duration, Utc};
use yahoo_finance_api as yahoo;

/// Yahoo Finance statement provider.
pub struct YahooProvider {
    client: YahooClient,
    quotes: yahoo::YahooConnector,
    config: FetchConfig,
}

impl std::fmt::Debug for YahooProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl YahooProvider {
    /// Create a provider with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self> {
        Ok(Self {
            client: YahooClient::new(&config)?,
            quotes: yahoo::YahooConnector::new()?,
            config,
        })
    }

    /// The configuration this provider was built with.
    pub const fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Close of the most recent daily bar.
    async fn latest_price(&self, ticker: &str) -> Result<f64> {
        let response = self.quotes.get_latest_quotes(ticker, "1d").await?;
        let quote = response.last_quote()?;
        Ok(quote.close)
    }

    async fn fetch_frequency(&self, raw: &mut RawStatementSet, frequency: Frequency) -> Result<()> {
        let now = Utc::now();
        let start = now - Duration::days(366 * i64::from(self.config.history_years));

        let mut types = request_types(BALANCE_SHEET_FIELDS, frequency);
        types.extend(request_types(INCOME_STATEMENT_FIELDS, frequency));

        let body = self
            .client
            .timeseries(&raw.ticker, &types, start.timestamp(), now.timestamp())
            .await?;

        let (balance, income) = match frequency {
            Frequency::Annual => (
                StatementKind::AnnualBalanceSheet,
                StatementKind::AnnualIncomeStatement,
            ),
            Frequency::Quarterly => (
                StatementKind::QuarterlyBalanceSheet,
                StatementKind::QuarterlyIncomeStatement,
            ),
        };
        *raw.statement_mut(balance) = parse_statement(&body, frequency, BALANCE_SHEET_FIELDS)?;
        *raw.statement_mut(income) = parse_statement(&body, frequency, INCOME_STATEMENT_FIELDS)?;
        Ok(())
    }
}

impl StatementProvider for YahooProvider {
    async fn fetch_statements(&self, ticker: &str) -> Result<RawStatementSet> {
        let mut raw = RawStatementSet::new(ticker);
        self.fetch_frequency(&mut raw, Frequency::Annual).await?;
        self.fetch_frequency(&mut raw, Frequency::Quarterly).await?;

        tracing::info!(
            ticker = %raw.ticker,
            annual_periods = raw.annual_balance_sheet.periods().len(),
            quarterly_periods = raw.quarterly_balance_sheet.periods().len(),
            "fetched statements"
        );
        Ok(raw)
    }

    async fn fetch_company_info(&self, ticker: &str) -> Result<CompanyInfo> {
        let body = self.client.quote(ticker).await?;
        let mut info = parse_company_info(&body, ticker)?;

        let has_price = info.number(info_keys::REGULAR_MARKET_PRICE).is_some()
            || info.number(info_keys::CURRENT_PRICE).is_some();
        if !has_price {
            match self.latest_price(ticker).await {
                Ok(price) => info.insert(info_keys::REGULAR_MARKET_PRICE, price),
                Err(e) => tracing::warn!(%ticker, error = %e, "no price available"),
            }
        }
        Ok(info)
    }
}
