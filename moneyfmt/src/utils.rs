use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;
use crate::error::ParseError;

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    // [+-]? - необязательный знак
    // [0-9]+\.?[0-9]* - целая часть, точка и дробная часть (обе необязательны)
    // \.[0-9]+ - или только дробная часть
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").unwrap()
});

/// Убирает разделители разрядов
pub(crate) fn strip_grouping(raw: &str) -> String {
    raw.replace(',', "")
}

/// Пустая строка или одинокая точка форматируются в пустую строку
pub(crate) fn is_degenerate(raw: &str) -> bool {
    let s = strip_grouping(raw);
    let s = s.trim();
    s.is_empty() || s == "."
}

/// Разбирает сумму в точное десятичное число.
///
/// Допускает разделители разрядов, ведущий `+`/`-`, точку в начале или в конце (".5", "5.").
pub(crate) fn parse_decimal(raw: &str) -> Result<Decimal, ParseError> {
    let cleaned = strip_grouping(raw.trim());

    if cleaned.is_empty() {
        return Err(ParseError::InvalidAmount("empty amount".into()));
    }
    if !AMOUNT_RE.is_match(&cleaned) {
        return Err(ParseError::InvalidAmount(format!("not a decimal number: {cleaned}")));
    }

    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };
    let unsigned = unsigned.strip_suffix('.').unwrap_or(unsigned);
    let unsigned = if unsigned.starts_with('.') {
        format!("0{unsigned}")
    } else {
        unsigned.to_string()
    };

    let value: Decimal = unsigned.parse()?;
    Ok(if negative { -value } else { value })
}

/// Разбор для режима модуля: пустое значение, "null" и мусор считаются нулём.
///
/// Переполнение - не мусор, а настоящее число: оно возвращается как ошибка.
pub(crate) fn parse_lenient(raw: &str) -> Result<Decimal, ParseError> {
    let s = raw.trim();
    if s.is_empty() || s == "null" {
        return Ok(Decimal::ZERO);
    }
    match parse_decimal(s) {
        Err(err @ ParseError::InvalidAmount(_)) => {
            debug!("{err}, treating as zero");
            Ok(Decimal::ZERO)
        }
        other => other,
    }
}

/// Расставляет запятые каждые три цифры справа
pub(crate) fn group_thousands(int_digits: &str) -> String {
    let len = int_digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in int_digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
