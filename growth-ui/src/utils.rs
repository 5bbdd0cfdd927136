use rust_decimal::{Decimal, RoundingStrategy};

/// Normalizes numeric input: trims whitespace and removes thousands
/// separators, a leading currency symbol and a trailing percent sign.
fn normalize_number_input(
    s: &str,
    currency_symbol: &str,
) -> String {
    let trimmed = s.trim();
    let trimmed = if currency_symbol.is_empty() {
        trimmed
    } else {
        trimmed.strip_prefix(currency_symbol).unwrap_or(trimmed)
    };
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    trimmed.trim().replace(',', "")
}

/// Parses a survey answer into a [`Decimal`].
///
/// Returns `None` for empty input, meaning the field is still unset.
/// Anything else that does not parse is coerced to zero and logged.
pub fn parse_number(
    s: &str,
    currency_symbol: &str,
) -> Option<Decimal> {
    let normalized = normalize_number_input(s, currency_symbol);
    if normalized.is_empty() {
        return None;
    }
    let parsed = normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized));
    Some(parsed.unwrap_or_else(|e| {
        tracing::warn!(input = %s, "non-numeric answer treated as zero: {}", e);
        Decimal::ZERO
    }))
}

/// Caps a conversion rate at 100 percent. Lower values pass through.
pub fn clamp_conversion_rate(rate: Decimal) -> Decimal {
    rate.min(Decimal::ONE_HUNDRED)
}

/// Parses a yes/no answer. Returns `None` for anything unrecognised.
pub fn parse_yes_no(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => Some(true),
        "n" | "no" | "false" => Some(false),
        _ => None,
    }
}

/// Formats a number with comma thousands separators and at most two
/// decimals, trailing zeros dropped. Halves round away from zero.
pub fn format_number(value: Decimal) -> String {
    let text = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Formats an amount with the currency symbol in front, e.g. `£9,800`.
pub fn format_currency(
    value: Decimal,
    currency_symbol: &str,
) -> String {
    format!("{currency_symbol}{}", format_number(value))
}
