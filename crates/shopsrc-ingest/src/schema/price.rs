use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use super::ResolveError;

const DEFAULT_LOCALE: &str = "en-US";

/// Languages rendered with a decimal comma and a trailing currency symbol.
const COMMA_DECIMAL_LANGUAGES: [&str; 6] = ["de", "fr", "es", "it", "nl", "pt"];

/// Arguments of the price `amount` resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountOptions {
    /// BCP 47 tag; `en-US` when unset.
    pub locale: Option<String>,
    /// Overrides the stored currency code.
    pub currency: Option<String>,
    pub format: bool,
}

/// Resolves a stored price amount.
///
/// Returns `amount` untouched unless a currency override or formatting is
/// requested; then the amount is rounded half away from zero to the
/// currency's minor units and rendered for the locale.
///
/// # Errors
///
/// [`ResolveError::InvalidAmount`] if a formatted amount is not a decimal.
pub fn format_amount(
    amount: &str,
    currency_code: &str,
    options: &AmountOptions,
) -> Result<String, ResolveError> {
    if options.currency.is_none() && !options.format {
        return Ok(amount.to_owned());
    }

    let currency = options
        .currency
        .as_deref()
        .unwrap_or(currency_code)
        .to_ascii_uppercase();
    let locale = options.locale.as_deref().unwrap_or(DEFAULT_LOCALE);

    let mut value = Decimal::from_str(amount.trim()).map_err(|e| ResolveError::InvalidAmount {
        amount: amount.to_owned(),
        reason: e.to_string(),
    })?;
    let minor_units = minor_units(&currency);
    value = value.round_dp_with_strategy(minor_units, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(minor_units);

    let comma_decimal = uses_comma_decimal(locale);
    let number = group_digits(&value.to_string(), comma_decimal);

    Ok(match (symbol(&currency), comma_decimal) {
        (Some(symbol), false) => match number.strip_prefix('-') {
            Some(abs) => format!("-{symbol}{abs}"),
            None => format!("{symbol}{number}"),
        },
        (Some(symbol), true) => format!("{number} {symbol}"),
        (None, _) => format!("{number} {currency}"),
    })
}

fn symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" | "CAD" | "AUD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn minor_units(currency: &str) -> u32 {
    if currency == "JPY" {
        0
    } else {
        2
    }
}

fn uses_comma_decimal(locale: &str) -> bool {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    COMMA_DECIMAL_LANGUAGES.contains(&language.as_str())
}

/// Inserts thousands separators into a plain decimal string and swaps the
/// decimal point for a comma when asked.
fn group_digits(plain: &str, comma_decimal: bool) -> String {
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };
    let (group_sep, decimal_sep) = if comma_decimal { ('.', ',') } else { (',', '.') };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(ch);
    }

    let mut out = String::from(sign);
    out.push_str(&grouped);
    if let Some(frac_part) = frac_part {
        out.push(decimal_sep);
        out.push_str(frac_part);
    }
    out
}
