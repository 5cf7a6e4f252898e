//! Integration tests for the historical series.

use altman_core::{HistoryError, SeriesBuilder, SeriesConfig, build_series, compute_z_score};
use altman_data::{CompanyInfo, RawStatementSet, StatementKind, StatementTable};
use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add_balance(table: StatementTable, period: NaiveDate, assets: f64) -> StatementTable {
    table
        .with_value("Total Assets", period, assets)
        .with_value("Total Liab", period, 400.0)
        .with_value("Total Current Assets", period, 300.0)
        .with_value("Total Current Liabilities", period, 100.0)
        .with_value("Retained Earnings", period, 150.0)
}

fn add_income(table: StatementTable, period: NaiveDate) -> StatementTable {
    table
        .with_value("Ebit", period, 120.0)
        .with_value("Total Revenue", period, 500.0)
}

/// Fiscal years ending in September, most recent first.
fn multi_year(years: &[i32]) -> RawStatementSet {
    let mut balance = StatementTable::new();
    let mut income = StatementTable::new();
    for &year in years {
        let period = date(year, 9, 30);
        balance = add_balance(balance, period, 1000.0);
        income = add_income(income, period);
    }
    RawStatementSet::new("ACME")
        .with_statement(StatementKind::AnnualBalanceSheet, balance)
        .with_statement(StatementKind::AnnualIncomeStatement, income)
        .with_info(CompanyInfo::new().with("marketCap", 800.0))
}

#[test]
fn test_series_sorted_ascending() {
    let points = build_series(&multi_year(&[2023, 2022, 2021]), 5).unwrap();
    let years: Vec<i32> = points.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2021, 2022, 2023]);
    for point in &points {
        assert_relative_eq!(point.z_score, 2.5455, epsilon = 1e-9);
        assert_relative_eq!(point.z_score, compute_z_score(point.ratios).score);
    }
}

#[test]
fn test_max_years_keeps_most_recent() {
    let points = build_series(&multi_year(&[2024, 2023, 2022, 2021, 2020, 2019, 2018]), 5).unwrap();
    let years: Vec<i32> = points.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2020, 2021, 2022, 2023, 2024]);

    let all = build_series(&multi_year(&[2024, 2023, 2022, 2021, 2020, 2019, 2018]), 0).unwrap();
    assert_eq!(all.len(), 7);
}

#[test]
fn test_duplicate_year_first_column_wins() {
    let first = date(2023, 12, 31);
    let second = date(2023, 1, 31);
    let balance = add_balance(StatementTable::new(), first, 1000.0);
    let balance = add_balance(balance, second, 2000.0);
    let income = add_income(StatementTable::new(), first);
    let income = add_income(income, second);

    let raw = RawStatementSet::new("ACME")
        .with_statement(StatementKind::AnnualBalanceSheet, balance)
        .with_statement(StatementKind::AnnualIncomeStatement, income)
        .with_info(CompanyInfo::new().with("marketCap", 800.0));

    let points = build_series(&raw, 5).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].period, first);
    assert_relative_eq!(points[0].ratios.working_capital_to_assets, 0.2);
}

#[test]
fn test_pairing_gap_boundary() {
    let period = date(2023, 1, 1);
    let build = |gap: i64| {
        let raw = RawStatementSet::new("ACME")
            .with_statement(
                StatementKind::AnnualBalanceSheet,
                add_balance(StatementTable::new(), period, 1000.0),
            )
            .with_statement(
                StatementKind::AnnualIncomeStatement,
                add_income(StatementTable::new(), period + Duration::days(gap)),
            )
            .with_info(CompanyInfo::new().with("marketCap", 800.0));
        build_series(&raw, 5)
    };

    let paired = build(180).unwrap();
    assert_eq!(paired[0].income_period, period + Duration::days(180));

    assert_eq!(
        build(181),
        Err(HistoryError::Unavailable {
            ticker: "ACME".to_string()
        })
    );
}

#[test]
fn test_custom_pairing_gap() {
    let period = date(2023, 1, 1);
    let raw = RawStatementSet::new("ACME")
        .with_statement(
            StatementKind::AnnualBalanceSheet,
            add_balance(StatementTable::new(), period, 1000.0),
        )
        .with_statement(
            StatementKind::AnnualIncomeStatement,
            add_income(StatementTable::new(), period + Duration::days(200)),
        )
        .with_info(CompanyInfo::new().with("marketCap", 800.0));

    let builder = SeriesBuilder::new(SeriesConfig {
        max_years: 5,
        max_pairing_gap_days: 365,
    });
    assert_eq!(builder.build(&raw).unwrap().len(), 1);
}

#[test]
fn test_incomplete_and_zero_years_are_skipped() {
    let mut raw = multi_year(&[2023, 2022, 2021]);
    raw.annual_balance_sheet
        .insert("Total Assets", date(2022, 9, 30), 0.0);
    let income = add_income(StatementTable::new(), date(2023, 9, 30));
    raw.annual_income_statement =
        add_income(income, date(2022, 9, 30)).with_value("Ebit", date(2021, 9, 30), 90.0);

    // 2022: zero assets. 2021: no revenue.
    let points = build_series(&raw, 5).unwrap();
    let years: Vec<i32> = points.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2023]);
}

#[test]
fn test_alias_names_are_not_used() {
    let period = date(2023, 9, 30);
    let raw = RawStatementSet::new("ACME")
        .with_statement(
            StatementKind::AnnualBalanceSheet,
            StatementTable::new()
                .with_value("TotalAssets", period, 1000.0)
                .with_value("Total Liab", period, 400.0)
                .with_value("Total Current Assets", period, 300.0)
                .with_value("Total Current Liabilities", period, 100.0)
                .with_value("Retained Earnings", period, 150.0),
        )
        .with_statement(
            StatementKind::AnnualIncomeStatement,
            add_income(StatementTable::new(), period),
        )
        .with_info(CompanyInfo::new().with("marketCap", 800.0));

    assert!(matches!(
        build_series(&raw, 5),
        Err(HistoryError::Unavailable { .. })
    ));
}

#[test]
fn test_missing_market_cap() {
    let mut raw = multi_year(&[2023]);
    raw.info = CompanyInfo::new();
    assert!(matches!(
        build_series(&raw, 5),
        Err(HistoryError::Unavailable { .. })
    ));
}
