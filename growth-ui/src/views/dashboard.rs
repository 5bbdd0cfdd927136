//! Results dashboard: scenario cards, cumulative chart and call to action.

use std::io::{self, Write};

use growth_core::{CalculatorResults, ScenarioKind, ScenarioResult, UserData};

use super::chart::{Series, render_area_chart};
use crate::config::DisplayConfig;
use crate::utils::{format_currency, format_number};

const CARD_WIDTH: usize = 44;

fn glyph(kind: ScenarioKind) -> char {
    match kind {
        ScenarioKind::Moderate => '#',
        ScenarioKind::Average => '=',
        ScenarioKind::OverPerform => ':',
    }
}

fn card_row<W: Write>(
    out: &mut W,
    name: &str,
    value: &str,
) -> io::Result<()> {
    let inner = CARD_WIDTH - 4;
    let gap = inner.saturating_sub(name.chars().count() + value.chars().count());
    writeln!(out, "| {name}{}{value} |", " ".repeat(gap))
}

fn horizon_phrase(months: usize) -> String {
    match months {
        12 => "year".to_string(),
        1 => "month".to_string(),
        _ => format!("{months} months"),
    }
}

/// Writes one scenario card. The popular card carries a "Most Likely" tag.
pub fn render_card<W: Write>(
    out: &mut W,
    result: &ScenarioResult,
    is_popular: bool,
    currency_symbol: &str,
) -> io::Result<()> {
    let border = format!("+{}+", "-".repeat(CARD_WIDTH - 2));
    writeln!(out, "{border}")?;
    let title = if is_popular {
        format!("{}  [MOST LIKELY]", result.label)
    } else {
        result.label.clone()
    };
    card_row(out, &title, "")?;
    writeln!(out, "{border}")?;
    card_row(
        out,
        "New Enquiries /mo",
        &format!("+{}", format_number(result.additional_enquiries)),
    )?;
    card_row(
        out,
        "Enquiries to Customers",
        &format_number(result.new_customers),
    )?;
    card_row(
        out,
        "Additional Revenue /mo",
        &format_currency(result.monthly_revenue, currency_symbol),
    )?;
    card_row(
        out,
        &format!("{}-Month Cumulative", result.monthly_projections.len()),
        &format_currency(result.annual_cumulative_revenue, currency_symbol),
    )?;
    writeln!(out, "{border}")
}

/// Writes the full results screen for `data`.
pub fn render_dashboard<W: Write>(
    out: &mut W,
    data: &UserData,
    results: &CalculatorResults,
    display: &DisplayConfig,
) -> io::Result<()> {
    let symbol = display.currency_symbol.as_str();
    let industry = data
        .industry
        .map_or("service", |industry| industry.label());

    writeln!(out)?;
    writeln!(out, "Your Projected Growth with GBP Optimization")?;
    writeln!(
        out,
        "Based on your {industry} business metrics, here is the potential revenue hidden in the Google Map Pack."
    )?;
    writeln!(out)?;

    for (kind, result) in results.iter() {
        render_card(out, result, kind == ScenarioKind::Average, symbol)?;
    }

    let months = results.average.monthly_projections.len();
    writeln!(out)?;
    writeln!(out, "{months}-Month Cumulative Revenue Growth")?;
    writeln!(
        out,
        "How your additional revenue scales over the next {}.",
        horizon_phrase(months)
    )?;
    writeln!(out)?;
    let series: Vec<Series<'_>> = results
        .iter()
        .map(|(kind, result)| Series {
            name: result.label.as_str(),
            glyph: glyph(kind),
            values: &result.monthly_projections,
        })
        .collect();
    render_area_chart(out, &series, symbol)?;

    writeln!(out)?;
    writeln!(out, "Ready to claim your spot in the Top 3?")?;
    writeln!(
        out,
        "Our specialized GBP heatmap audit shows exactly where you're losing customers to competitors."
    )?;
    writeln!(
        out,
        "Start your journey for just {}/mo.",
        format_currency(display.service_cost, symbol)
    )?;
    writeln!(
        out,
        "  ~{}  Potential Revenue Opportunity",
        format_currency(results.average.annual_cumulative_revenue, symbol)
    )
}
