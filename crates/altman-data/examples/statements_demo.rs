//! Fetch the raw statements of one company from Yahoo Finance and list what
//! each statement contains.
//!
//! Usage: `cargo run -p altman-data --example statements_demo -- MSFT`

use altman_data::{FetchConfig, StatementKind, YahooProvider, fetch_with_timeout, info_keys};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ticker = std::env::args().nth(1).unwrap_or_else(|| "MSFT".to_string());
    let config = FetchConfig::default();
    let timeout = config.timeout;
    let provider = YahooProvider::new(config)?;

    println!("=== Raw statements for {ticker} ===\n");
    let raw = fetch_with_timeout(&provider, &ticker, timeout).await?;
    println!("Company: {}", raw.company_name());
    if let Some(market_cap) = raw.info.number(info_keys::MARKET_CAP) {
        println!("Market cap: {market_cap:.0}");
    }

    for kind in StatementKind::ALL {
        let table = raw.statement(kind);
        match table.latest_period() {
            Some(latest) => println!(
                "\n{kind}: {} fields, {} periods, latest {latest}",
                table.field_names().count(),
                table.periods().len()
            ),
            None => println!("\n{kind}: empty"),
        }
    }

    println!("\nAnnual balance sheet:");
    println!("{}", raw.annual_balance_sheet.to_dataframe()?);

    Ok(())
}
