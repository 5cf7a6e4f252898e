//! Demonstration of the export and chart functionality in altman-output.

use altman_core::{HistoricalPoint, Ratios, compute_z_score};
use altman_output::{ExportFormat, Exporter, HistoryExport, TrendChart};
use chrono::NaiveDate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Altman Export Demo ===\n");

    let ratios = [
        (2020, Ratios::new(0.05, 0.10, 0.04, 0.6, 0.9)),
        (2021, Ratios::new(0.08, 0.15, 0.07, 1.1, 1.0)),
        (2022, Ratios::new(0.12, 0.22, 0.10, 1.6, 1.1)),
        (2023, Ratios::new(0.15, 0.30, 0.14, 2.4, 1.2)),
    ];

    let mut points = Vec::new();
    for (year, ratios) in ratios {
        let period = NaiveDate::from_ymd_opt(year, 12, 31).ok_or("invalid date")?;
        points.push(HistoricalPoint {
            year,
            period,
            income_period: period,
            z_score: compute_z_score(ratios).score,
            ratios,
        });
    }

    print!("{}", TrendChart::new("Historical Z-Score Trend for Demo Corp").render(&points));

    let export = HistoryExport::new("DEMO", &points);

    println!("\nCSV Format:");
    println!("{}", export.export_to_string(ExportFormat::Csv)?);

    println!("Pretty JSON Format:");
    println!("{}", export.export_to_string(ExportFormat::PrettyJson)?);

    Ok(())
}
