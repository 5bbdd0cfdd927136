//! Text area chart for cumulative revenue curves.

use std::io::{self, Write};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::utils::format_currency;

/// Rows of plot area, excluding axes.
pub const CHART_HEIGHT: usize = 10;

const COLUMN_WIDTH: usize = 5;

/// One plotted curve.
#[derive(Debug, Clone)]
pub struct Series<'a> {
    pub name: &'a str,
    pub glyph: char,
    pub values: &'a [Decimal],
}

/// Number of filled rows for `value` on a chart topped at `max`.
///
/// Negative values draw nothing. Any positive value fills at least one row.
fn bar_height(
    value: Decimal,
    max: Decimal,
    height: usize,
) -> usize {
    if value <= Decimal::ZERO || max <= Decimal::ZERO {
        return 0;
    }
    let rows = (value / max * Decimal::from(height)).round();
    rows.to_usize().unwrap_or(height).clamp(1, height)
}

/// Draws overlapping area series, earlier series in front.
///
/// Series are expected to share a length; shorter ones leave blank columns.
pub fn render_area_chart<W: Write>(
    out: &mut W,
    series: &[Series<'_>],
    currency_symbol: &str,
) -> io::Result<()> {
    let columns = series.iter().map(|s| s.values.len()).max().unwrap_or(0);
    let max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .max()
        .unwrap_or(Decimal::ZERO);

    if columns == 0 || max <= Decimal::ZERO {
        return writeln!(out, "  (no projected revenue to chart)");
    }

    let top_label = format_currency(max, currency_symbol);
    let bottom_label = format_currency(Decimal::ZERO, currency_symbol);
    let axis_width = top_label.chars().count().max(bottom_label.chars().count());

    let heights: Vec<Vec<usize>> = series
        .iter()
        .map(|s| {
            s.values
                .iter()
                .map(|&value| bar_height(value, max, CHART_HEIGHT))
                .collect()
        })
        .collect();

    for row in (1..=CHART_HEIGHT).rev() {
        let label = match row {
            CHART_HEIGHT => top_label.as_str(),
            1 => bottom_label.as_str(),
            _ => "",
        };
        write!(out, "{label:>axis_width$} |")?;
        for column in 0..columns {
            let glyph = series
                .iter()
                .zip(&heights)
                .find(|(_, h)| h.get(column).is_some_and(|&filled| filled >= row))
                .map_or(' ', |(s, _)| s.glyph);
            let cell: String = std::iter::repeat_n(glyph, COLUMN_WIDTH - 1).collect();
            write!(out, "{cell} ")?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "{:>axis_width$} +{}",
        "",
        "-".repeat(columns * COLUMN_WIDTH)
    )?;
    write!(out, "{:>axis_width$}  ", "")?;
    for column in 1..=columns {
        write!(out, "{:<width$}", format!("M{column}"), width = COLUMN_WIDTH)?;
    }
    writeln!(out)?;

    let legend: Vec<String> = series
        .iter()
        .map(|s| format!("{} {}", s.glyph, s.name))
        .collect();
    writeln!(out, "{:>axis_width$}  {}", "", legend.join("   "))
}
