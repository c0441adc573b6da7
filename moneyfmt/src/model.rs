use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::error::ParseError;

/// Валюты, которые в упрощённом режиме отображаются без дробной части
pub const ZERO_DECIMAL_CURRENCIES: [&str; 2] = ["VND", "KHR"];

/// Количество знаков после точки по умолчанию
pub const DEFAULT_DIGITS: u32 = 2;

/// Максимально допустимое количество знаков после точки
pub const MAX_DIGITS: u32 = 10;

/// Неизменяемый набор параметров форматирования.
///
/// Каждый `with_*` метод возвращает новую конфигурацию,
/// старая остаётся нетронутой.
///
/// Пример использования:
/// ```
/// use moneyfmt::{Configuration, render};
///
/// let config = Configuration::default()
///     .with_currency("USD")
///     .with_show_currency(true)
///     .with_currency_at_end(false);
///
/// assert_eq!(render("1340", &config), "USD 1,340.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// код валюты, может быть пустым
    pub currency_code: String,
    /// показывать ли код валюты
    pub show_currency: bool,
    /// код валюты после суммы (иначе - перед ней)
    pub currency_at_end: bool,
    /// VND и KHR без дробной части
    pub simplify_amount: bool,
    /// отбрасывать знак
    pub absolute_value: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            currency_code: String::new(),
            show_currency: false,
            currency_at_end: true,
            simplify_amount: true,
            absolute_value: false,
        }
    }
}

impl Configuration {
    pub fn with_currency(self, currency_code: impl Into<String>) -> Self {
        Configuration { currency_code: currency_code.into(), ..self }
    }

    pub fn with_show_currency(self, show_currency: bool) -> Self {
        Configuration { show_currency, ..self }
    }

    pub fn with_currency_at_end(self, currency_at_end: bool) -> Self {
        Configuration { currency_at_end, ..self }
    }

    pub fn with_simplify_amount(self, simplify_amount: bool) -> Self {
        Configuration { simplify_amount, ..self }
    }

    pub fn with_absolute_value(self, absolute_value: bool) -> Self {
        Configuration { absolute_value, ..self }
    }

    /// Количество знаков после точки для текущей валюты
    pub fn fraction_digits(&self) -> u32 {
        if self.simplify_amount && ZERO_DECIMAL_CURRENCIES.contains(&self.currency_code.as_str()) {
            0
        } else {
            DEFAULT_DIGITS
        }
    }

    /// Нужно ли добавлять код валюты к сумме
    pub(crate) fn decorates(&self) -> bool {
        self.show_currency && !self.currency_code.is_empty()
    }
}

/// Точность (количество знаков после точки), всегда в пределах [0, 10]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Precision(u32);

impl Precision {
    /// Строгий конструктор: значения вне [0, 10] - ошибка
    pub fn try_new(digits: i32) -> Result<Self, ParseError> {
        match u32::try_from(digits) {
            Ok(d) if d <= MAX_DIGITS => Ok(Precision(d)),
            _ => Err(ParseError::ConfigurationOutOfRange(digits)),
        }
    }

    /// Прижимает запрошенную точность к диапазону [0, 10]
    pub fn clamped(digits: i32) -> Self {
        Self::try_new(digits).unwrap_or_else(|err| {
            debug!("{err}, clamping");
            Precision(digits.clamp(0, MAX_DIGITS as i32) as u32)
        })
    }

    pub fn digits(self) -> u32 {
        self.0
    }
}

impl From<u32> for Precision {
    fn from(digits: u32) -> Self {
        Precision(digits.min(MAX_DIGITS))
    }
}
