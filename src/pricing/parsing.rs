//! Price strings from the reference table and money formatting.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::pricing::calculators::round_money;

/// Currency prefix for Panamanian balboas
pub const CURRENCY_SYMBOL: &str = "B/.";

/// Parse a comma-decimal price string such as `"$ 40,00"`.
///
/// Never fails: empty, missing or malformed input yields zero. When a comma
/// is present any dots are read as thousands separators.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use cotizador::pricing::parsing::parse_price;
///
/// assert_eq!(parse_price(Some("$ 40,00")), dec!(40.00));
/// assert_eq!(parse_price(Some("1,5")), dec!(1.5));
/// assert_eq!(parse_price(None), dec!(0));
/// ```
pub fn parse_price(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };

    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replacen(',', ".", 1)
    } else {
        cleaned
    };

    Decimal::from_str(&normalized).unwrap_or(Decimal::ZERO)
}

/// Format an amount as `B/. 1,234.56`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = round_money(amount, 2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!("{}{} {}.{}", sign, CURRENCY_SYMBOL, group_thousands(whole), cents)
}

/// Format a plain number with a fixed number of decimals.
pub fn format_number(value: Decimal, places: u32) -> String {
    format!("{:.*}", places as usize, round_money(value, places))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
