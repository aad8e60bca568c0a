//! Horizontal text bar chart of the key ratios.

use finlens_ratios::RatioResult;

/// Chart rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartConfig {
    /// Width in characters of the longest bar.
    pub bar_width: usize,

    /// Glyph for bars of non-negative values.
    pub positive_glyph: char,

    /// Glyph for bars of negative values.
    pub negative_glyph: char,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bar_width: 40,
            positive_glyph: '█',
            negative_glyph: '░',
        }
    }
}

/// Render one bar per ratio, in result order.
///
/// Bar length is proportional to `|value|` relative to the largest `|value|`.
/// Any non-zero value gets at least one glyph.
pub fn render_bar_chart(ratios: &RatioResult, config: &ChartConfig) -> String {
    let mut output = String::new();

    let label_width = ratios
        .pairs()
        .map(|(metric, _)| metric.len())
        .max()
        .unwrap_or(0);
    let max_abs = ratios
        .pairs()
        .map(|(_, value)| value.abs())
        .fold(0.0_f64, f64::max);
    let bar_width = config.bar_width;

    output.push_str("\nKey Financial Ratios\n");
    output.push_str(&"=".repeat(label_width + bar_width + 14));
    output.push('\n');

    for (metric, value) in ratios.pairs() {
        let mut len = if max_abs > 0.0 {
            ((value.abs() / max_abs) * bar_width as f64).round() as usize
        } else {
            0
        };
        if len == 0 && value != 0.0 && bar_width > 0 {
            len = 1;
        }

        let glyph = if value < 0.0 {
            config.negative_glyph
        } else {
            config.positive_glyph
        };
        let bar: String = std::iter::repeat_n(glyph, len.min(bar_width)).collect();

        output.push_str(&format!(
            "{:<label_width$} | {:<bar_width$} {:>10.2}\n",
            metric, bar, value
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finlens_ratios::LineItemValues;

    fn ratios(net_income: f64) -> RatioResult {
        RatioResult::from_values(&LineItemValues {
            period: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            total_revenue: 1000.0,
            gross_profit: 400.0,
            net_income,
            interest_expense: 50.0,
            total_assets: 2000.0,
            stockholders_equity: 800.0,
            total_liabilities: 1200.0,
            current_assets: 500.0,
            current_liabilities: 250.0,
            operating_cash_flow: 150.0,
        })
        .unwrap()
    }

    fn bar_len(line: &str, glyph: char) -> usize {
        line.chars().filter(|c| *c == glyph).count()
    }

    #[test]
    fn test_one_line_per_ratio() {
        let chart = render_bar_chart(&ratios(100.0), &ChartConfig::default());
        let bars: Vec<&str> = chart.lines().filter(|l| l.contains(" | ")).collect();

        assert_eq!(bars.len(), 7);
        assert!(bars[0].starts_with("Gross Profit Margin (%)"));
        assert!(bars[6].starts_with("Interest Coverage Ratio"));
    }

    #[test]
    fn test_bars_proportional_to_largest() {
        let config = ChartConfig::default();
        let chart = render_bar_chart(&ratios(100.0), &config);
        let bars: Vec<&str> = chart.lines().filter(|l| l.contains(" | ")).collect();

        // Gross margin 40.0 is the largest, ROE 12.5 is under a third of it.
        assert_eq!(bar_len(bars[0], config.positive_glyph), 40);
        assert_eq!(bar_len(bars[1], config.positive_glyph), 10);
        assert_eq!(bar_len(bars[3], config.positive_glyph), 13);
        assert_eq!(bar_len(bars[4], config.positive_glyph), 2);
    }

    #[test]
    fn test_negative_values_use_distinct_glyph() {
        let config = ChartConfig::default();
        let chart = render_bar_chart(&ratios(-100.0), &config);
        let bars: Vec<&str> = chart.lines().filter(|l| l.contains(" | ")).collect();

        assert_eq!(bar_len(bars[0], config.negative_glyph), 0);
        assert_eq!(bar_len(bars[1], config.negative_glyph), 10);
        assert_eq!(bar_len(bars[1], config.positive_glyph), 0);
        assert!(bars[1].ends_with("-10.00"));
    }
}
