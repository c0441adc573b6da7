use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;
use crate::error::ParseError;
use crate::model::{Configuration, Precision};
use crate::utils::{group_thousands, is_degenerate, parse_decimal, parse_lenient};

/// Форматирует "сырое" значение по конфигурации.
///
/// Никогда не падает: любая ошибка логируется и превращается в пустую строку.
/// Если нужно отличать "не удалось" от "пустого ввода" - см. [`try_render`].
pub fn render(raw: &str, config: &Configuration) -> String {
    try_render(raw, config).unwrap_or_else(|err| {
        warn!("failed to render {raw:?}: {err}");
        String::new()
    })
}

/// Форматирует "сырое" значение по конфигурации.
///
/// Порядок: модуль (если включён) -> округление half-up -> разряды -> код валюты.
/// Пустая строка и одинокая точка дают `Ok("")`.
pub fn try_render(raw: &str, config: &Configuration) -> Result<String, ParseError> {
    if is_degenerate(raw) {
        return Ok(String::new());
    }

    let value = if config.absolute_value {
        parse_lenient(raw)?.abs()
    } else {
        parse_decimal(raw)?
    };

    let precision = Precision::from(config.fraction_digits());
    let number = group(round_half_up(value, precision), precision);

    Ok(decorate(number, config))
}

/// Форматирует число с разделителями разрядов и ровно `digits` знаками после точки.
///
/// `digits` прижимается к диапазону [0, 10].
pub fn format_amount(raw: &str, digits: i32) -> Result<String, ParseError> {
    if is_degenerate(raw) {
        return Ok(String::new());
    }
    let precision = Precision::clamped(digits);
    let value = parse_decimal(raw)?;

    Ok(group(round_half_up(value, precision), precision))
}

/// Округление половины от нуля: 1.005 -> 1.01, -1.005 -> -1.01
pub fn round_half_up(value: Decimal, precision: Precision) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(precision.digits(), RoundingStrategy::MidpointAwayFromZero);
    // -0.001 -> 0.00, а не -0.00
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

fn group(value: Decimal, precision: Precision) -> String {
    let digits = precision.digits() as usize;
    let text = format!("{:.digits$}", value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + text.len() / 3 + 1);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn decorate(number: String, config: &Configuration) -> String {
    if !config.decorates() {
        return number;
    }
    if config.currency_at_end {
        format!("{number} {}", config.currency_code)
    } else {
        format!("{} {number}", config.currency_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    // format_amount

    #[test]
    fn rounds_half_up_not_to_even() {
        assert_eq!(format_amount("1.005", 2).unwrap(), "1.01");
        assert_eq!(format_amount("1.015", 2).unwrap(), "1.02");
        assert_eq!(format_amount("2.5", 0).unwrap(), "3");
        assert_eq!(format_amount("-1.005", 2).unwrap(), "-1.01");
    }

    #[test]
    fn pads_fraction_with_zeros() {
        assert_eq!(format_amount("134000.6", 2).unwrap(), "134,000.60");
        assert_eq!(format_amount("7", 3).unwrap(), "7.000");
    }

    #[test]
    fn zero_digits_has_no_point() {
        assert_eq!(format_amount("134000.4", 0).unwrap(), "134,000");
    }

    #[test]
    fn negative_zero_is_plain_zero() {
        assert_eq!(format_amount("-0.001", 2).unwrap(), "0.00");
        assert_eq!(format_amount("-0", 0).unwrap(), "0");
    }

    #[test]
    fn groups_negative_numbers() {
        assert_eq!(format_amount("-1234567.891", 2).unwrap(), "-1,234,567.89");
        assert_eq!(format_amount("-123", 2).unwrap(), "-123.00");
    }

    #[test]
    fn clamps_out_of_range_digits() {
        assert_eq!(format_amount("1.5", -3).unwrap(), "2");
        assert_eq!(format_amount("1", 25).unwrap(), "1.0000000000");
    }

    #[test]
    fn accepts_already_grouped_input() {
        assert_eq!(format_amount("1,340.005", 2).unwrap(), "1,340.01");
    }

    #[test]
    fn degenerate_input_is_empty() {
        assert_eq!(format_amount("", 2).unwrap(), "");
        assert_eq!(format_amount(".", 2).unwrap(), "");
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(matches!(format_amount("12a", 2), Err(ParseError::InvalidAmount(_))));
    }

    #[test]
    fn keeps_large_values_exact() {
        // в double это число уже не представимо точно
        assert_eq!(
            format_amount("12345678901234567.895", 2).unwrap(),
            "12,345,678,901,234,567.90"
        );
    }

    // round_half_up

    #[test]
    fn round_half_up_keeps_requested_scale() {
        let d = Decimal::from_str("0.125").unwrap();
        assert_eq!(round_half_up(d, Precision::from(2)).to_string(), "0.13");
    }

    // render

    #[test]
    fn render_decorates_at_end_and_start() {
        let base = Configuration::default().with_currency("USD").with_show_currency(true);
        assert_eq!(render("1340", &base), "1,340.00 USD");
        assert_eq!(render("1340", &base.with_currency_at_end(false)), "USD 1,340.00");
    }

    #[test]
    fn render_skips_decoration_when_hidden_or_empty() {
        let hidden = Configuration::default().with_currency("USD");
        assert_eq!(render("1340", &hidden), "1,340.00");
        let no_code = Configuration::default().with_show_currency(true);
        assert_eq!(render("1340", &no_code), "1,340.00");
    }

    #[test]
    fn render_simplifies_zero_decimal_currencies() {
        let vnd = Configuration::default()
            .with_currency("VND")
            .with_show_currency(true);
        assert_eq!(render("134000", &vnd), "134,000 VND");
        assert_eq!(render("134000.5", &vnd), "134,001 VND");
        assert_eq!(render("134000", &vnd.with_simplify_amount(false)), "134,000.00 VND");
    }

    #[test]
    fn render_absolute_value() {
        let abs = Configuration::default().with_absolute_value(true);
        assert_eq!(render("-50.25", &abs), "50.25");
        assert_eq!(render("null", &abs), "0.00");
        assert_eq!(render("junk", &abs), "0.00");
    }

    #[test]
    fn render_absolute_value_reports_overflow() {
        let huge = "79228162514264337593543950335.5";
        let abs = Configuration::default().with_absolute_value(true);
        assert!(matches!(try_render(huge, &abs), Err(ParseError::Decimal(_))));
        assert_eq!(render(huge, &abs), "");
    }

    #[test]
    fn render_swallows_failures() {
        let c = Configuration::default();
        assert_eq!(render("junk", &c), "");
        assert!(try_render("junk", &c).is_err());
    }

    #[test]
    fn render_degenerate_input_even_with_abs() {
        let abs = Configuration::default().with_absolute_value(true);
        assert_eq!(try_render("", &abs).unwrap(), "");
        assert_eq!(try_render(".", &abs).unwrap(), "");
    }
}
