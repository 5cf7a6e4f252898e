//! Text rendering of the historical Z-Score trend.

use altman_core::HistoricalPoint;
use altman_core::zscore::{DISTRESS_THRESHOLD, SAFE_THRESHOLD};

const DEFAULT_HEIGHT: usize = 15;
const DEFAULT_COLUMN_WIDTH: usize = 8;
const AXIS_WIDTH: usize = 7;

/// Zone labels and the score each one is drawn at.
const ZONE_LABELS: [(f64, &str); 3] = [(3.3, "Safe Zone"), (2.4, "Grey Zone"), (1.0, "High Risk")];

/// ASCII chart of one score per year, with the zone thresholds drawn as
/// dashed lines.
#[derive(Debug, Clone)]
pub struct TrendChart {
    title: String,
    height: usize,
    column_width: usize,
}

impl TrendChart {
    /// Create a chart with default dimensions.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            height: DEFAULT_HEIGHT,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }

    /// Number of rows in the plot area (at least 2).
    pub fn height(mut self, height: usize) -> Self {
        self.height = height.max(2);
        self
    }

    /// Width of each year's column (at least 3).
    pub fn column_width(mut self, width: usize) -> Self {
        self.column_width = width.max(3);
        self
    }

    /// Render the series, oldest year on the left.
    pub fn render(&self, points: &[HistoricalPoint]) -> String {
        let points: Vec<&HistoricalPoint> = points.iter().filter(|p| p.z_score.is_finite()).collect();
        let mut output = String::new();
        output.push_str(&format!("{}\n", self.title));
        output.push_str(&"=".repeat(self.title.chars().count().max(20)));
        output.push('\n');

        if points.is_empty() {
            output.push_str("No historical data\n");
            return output;
        }

        let max_score = points.iter().map(|p| p.z_score).fold(f64::MIN, f64::max);
        let min_score = points.iter().map(|p| p.z_score).fold(f64::MAX, f64::min);
        let top = (max_score * 1.1).max(SAFE_THRESHOLD * 1.1);
        let bottom = min_score.min(0.0);

        let rows = self.height;
        let to_row = |value: f64| -> usize {
            let fraction = (top - value) / (top - bottom);
            ((fraction * (rows - 1) as f64).round() as usize).min(rows - 1)
        };

        let point_rows: Vec<usize> = points.iter().map(|p| to_row(p.z_score)).collect();
        let safe_row = to_row(SAFE_THRESHOLD);
        let distress_row = to_row(DISTRESS_THRESHOLD);

        for row in 0..rows {
            let value = top - (top - bottom) * row as f64 / (rows - 1) as f64;
            output.push_str(&format!("{value:>6.2} |"));

            let fill = if row == safe_row || row == distress_row {
                '-'
            } else {
                ' '
            };
            for &point_row in &point_rows {
                let mut cell: Vec<char> = std::iter::repeat_n(fill, self.column_width).collect();
                if point_row == row {
                    cell[self.column_width / 2] = '*';
                }
                output.extend(cell);
            }

            if let Some((_, label)) = ZONE_LABELS.iter().find(|(at, _)| to_row(*at) == row) {
                output.push_str(&format!(" {label}"));
            }
            // Trailing spaces from empty cells are noise.
            let trimmed = output.trim_end_matches(' ').len();
            output.truncate(trimmed);
            output.push('\n');
        }

        output.push_str(&" ".repeat(AXIS_WIDTH));
        output.push('+');
        output.push_str(&"-".repeat(self.column_width * points.len()));
        output.push('\n');
        output.push_str(&" ".repeat(AXIS_WIDTH + 1));
        for point in &points {
            output.push_str(&format!("{:^width$}", point.year, width = self.column_width));
        }
        let trimmed = output.trim_end_matches(' ').len();
        output.truncate(trimmed);
        output.push('\n');
        output
    }
}
