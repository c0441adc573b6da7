use std::io::Error as IoError;
use thiserror::Error;

/// Ошибки при разборе и форматировании денежных сумм
#[derive(Debug, Error)]
pub enum ParseError {
    // обёртки

    /// обёртка rust_decimal::Error (число вне допустимого диапазона)
    #[error("decimal error: {0}")]
    Decimal(#[from] rust_decimal::Error),
    /// обёртка csv::Error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// обёртка std::io::Error
    #[error("io error: {0}")]
    Io(#[from] IoError),

    // логические ошибки

    /// строка не является десятичным числом
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// запрошенная точность вне диапазона [0, 10]
    #[error("precision out of range: {0}")]
    ConfigurationOutOfRange(i32),
    /// повторное форматирование нормализованного значения дало другой результат
    #[error("round-trip mismatch for {raw:?}: {first:?} != {second:?}")]
    RoundTrip {
        raw: String,
        first: String,
        second: String,
    },
}
