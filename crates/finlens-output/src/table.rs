//! Fixed-width text tables.

use finlens_data::StatementTable;
use finlens_ratios::RatioResult;

const RULE_WIDTH: usize = 50;

/// Render the ratio table under the "Key Financial Ratios" heading.
///
/// Two columns, `Metric` and `Value`, with values to two decimals.
pub fn render_ratio_table(ratios: &RatioResult) -> String {
    let mut output = String::new();

    output.push_str("\nKey Financial Ratios\n");
    output.push_str(&format!("Period: {}\n", ratios.period()));
    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push('\n');

    output.push_str(&format!("{:<32} {:>17}\n", "Metric", "Value"));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');

    for (metric, value) in ratios.pairs() {
        output.push_str(&format!("{:<32} {:>17.2}\n", metric, value));
    }

    output.push_str(&"=".repeat(RULE_WIDTH));
    output.push('\n');

    output
}

/// Render a statement with one column per period, most recent first.
///
/// Values use thousands separators; cells with nothing reported stay blank.
pub fn render_statement_table(table: &StatementTable) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", table.kind()));

    if table.is_empty() {
        output.push_str("(no line items reported)\n");
        return output;
    }

    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| {
            row.values
                .iter()
                .map(|v| v.map(format_thousands).unwrap_or_default())
                .collect()
        })
        .collect();

    let label_width = table
        .rows()
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0)
        .max("Line Item".len());

    let column_widths: Vec<usize> = table
        .periods()
        .iter()
        .enumerate()
        .map(|(idx, period)| {
            cells
                .iter()
                .map(|row| row[idx].len())
                .max()
                .unwrap_or(0)
                .max(period.to_string().len())
        })
        .collect();

    let total_width = label_width + column_widths.iter().map(|w| w + 2).sum::<usize>();

    output.push_str(&"=".repeat(total_width));
    output.push('\n');

    output.push_str(&format!("{:<label_width$}", "Line Item"));
    for (period, width) in table.periods().iter().zip(column_widths.iter().copied()) {
        output.push_str(&format!("  {:>width$}", period.to_string()));
    }
    output.push('\n');
    output.push_str(&"-".repeat(total_width));
    output.push('\n');

    for (row, row_cells) in table.rows().iter().zip(&cells) {
        output.push_str(&format!("{:<label_width$}", row.label));
        for (cell, width) in row_cells.iter().zip(column_widths.iter().copied()) {
            output.push_str(&format!("  {:>width$}", cell));
        }
        output.push('\n');
    }

    output.push_str(&"=".repeat(total_width));
    output.push('\n');

    output
}

/// Format a number with comma thousands separators.
///
/// Whole numbers print without decimals; anything else keeps two.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = if value.fract() == 0.0 {
        format!("{:.0}", value.abs())
    } else {
        format!("{:.2}", value.abs())
    };

    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finlens_data::{LineItemRow, StatementKind};
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0")]
    #[case(999.0, "999")]
    #[case(1000.0, "1,000")]
    #[case(1_234_567.0, "1,234,567")]
    #[case(-1_234.5, "-1,234.50")]
    #[case(6.126, "6.13")]
    #[case(-391_035_000_000.0, "-391,035,000,000")]
    fn test_format_thousands(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_thousands(value), expected);
    }

    #[test]
    fn test_statement_table_blank_cells() {
        let table = StatementTable::new(
            StatementKind::BalanceSheet,
            vec![
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
                NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            ],
            vec![
                LineItemRow::new("Total Assets", vec![Some(2_000_000.0), Some(1_800_000.0)]),
                LineItemRow::new("Goodwill", vec![Some(5_000.0), None]),
            ],
        )
        .unwrap();

        let text = render_statement_table(&table);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "Balance Sheet");
        assert!(lines[3].starts_with("Line Item"));
        assert!(lines[3].contains("2024-12-31"));
        assert!(lines[5].contains("2,000,000"));
        assert!(lines[5].contains("1,800,000"));
        assert!(lines[6].trim_end().ends_with("5,000"));
    }

    #[test]
    fn test_empty_statement_table() {
        let text = render_statement_table(&StatementTable::empty(StatementKind::CashFlow));
        assert!(text.contains("Cash Flow Statement"));
        assert!(text.contains("no line items"));
    }
}
