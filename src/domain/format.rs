//! pt-BR presentation helpers shared by the receipt layout and the CLI.

use super::money::Money;
use chrono::NaiveDate;

const CURRENCY_PREFIX: &str = "R$\u{a0}";

/// Formats a value as Brazilian reais, e.g. `R$ 1.234,56`.
///
/// The separator after `R$` is a non-breaking space, as browsers print it.
pub fn format_currency(value: Money) -> String {
    let rounded = value.to_centavos().value();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{CURRENCY_PREFIX}{grouped},{fraction}")
}

/// Formats an ISO `YYYY-MM-DD` date as `DD/MM/YYYY`.
///
/// Empty input gives empty output. Anything that does not parse is returned
/// unchanged so a malformed date still shows up on the receipt.
pub fn format_date(iso: &str) -> String {
    let trimmed = iso.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => format_naive_date(date),
        Err(_) => iso.to_string(),
    }
}

pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(Money::new(dec!(0))), "R$\u{a0}0,00");
        assert_eq!(format_currency(Money::new(dec!(840))), "R$\u{a0}840,00");
        assert_eq!(format_currency(Money::new(dec!(1234.5))), "R$\u{a0}1.234,50");
        assert_eq!(
            format_currency(Money::new(dec!(1234567.891))),
            "R$\u{a0}1.234.567,89"
        );
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(Money::new(dec!(-6))), "-R$\u{a0}6,00");
        assert_eq!(format_currency(Money::new(dec!(-0.001))), "R$\u{a0}0,00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-03-10"), "10/03/2025");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("  "), "");
        assert_eq!(format_date("10/03/2025"), "10/03/2025");
    }
}
