//! Demonstration of the resolution registry
//!
//! This example shows how to:
//! - List the strategy chain of every canonical quantity
//! - Resolve a small in-memory statement set
//! - Inspect where each value came from
//!
//! Run with: cargo run --example resolution_chain_demo -p altman-core

use altman_core::{Quantity, registry::describe_chain, resolve};
use altman_data::{CompanyInfo, RawStatementSet, StatementKind, StatementTable};
use chrono::NaiveDate;

fn main() {
    println!("Altman Resolution Chains");
    println!("========================\n");

    for quantity in Quantity::CANONICAL {
        println!("{quantity}:");
        for (i, step) in describe_chain(quantity).iter().enumerate() {
            println!("  {}. {step}", i + 1);
        }
    }

    let Some(period) = NaiveDate::from_ymd_opt(2023, 12, 31) else {
        return;
    };
    let raw = RawStatementSet::new("DEMO")
        .with_statement(
            StatementKind::AnnualBalanceSheet,
            StatementTable::new()
                .with_value("TotalAssets", period, 1000.0)
                .with_value("StockholdersEquity", period, 600.0)
                .with_value("CurrentAssets", period, 300.0)
                .with_value("CurrentLiabilities", period, 100.0)
                .with_value("RetainedEarnings", period, 150.0),
        )
        .with_statement(
            StatementKind::AnnualIncomeStatement,
            StatementTable::new()
                .with_value("Operating Income", period, 120.0)
                .with_value("TotalRevenue", period, 500.0),
        )
        .with_info(
            CompanyInfo::new()
                .with("regularMarketPrice", 8.0)
                .with("sharesOutstanding", 100.0),
        );

    println!("\nResolving DEMO:");
    println!("---------------");
    match resolve(&raw) {
        Ok(financials) => {
            for quantity in Quantity::ALL {
                let source = financials
                    .provenance
                    .get(&quantity)
                    .map_or_else(|| "-".to_string(), ToString::to_string);
                println!(
                    "  {:20} {:>10.1}  {source}",
                    quantity.display_name(),
                    financials.value(quantity)
                );
            }
            if let Ok(z) = financials.z_score() {
                println!("\nZ-Score: {:.2} ({})", z.score, z.category);
            }
        }
        Err(e) => println!("  resolution failed: {e}"),
    }
}
