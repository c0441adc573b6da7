use std::io::{Read, Write};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use crate::error::ParseError;
use crate::formatter::{render, try_render};
use crate::model::Configuration;
use crate::normalizer::normalize;

/// Строка входного CSV: `currency,amount`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AmountRecord {
    /// код валюты; пустой - берётся из базовой конфигурации
    #[serde(default)]
    pub currency: String,
    /// сумма
    pub amount: String,
}

/// Строка выходного CSV: `currency,amount,display`
#[derive(Debug, Serialize)]
struct DisplayRecord<'a> {
    currency: &'a str,
    amount: &'a str,
    display: &'a str,
}

/// Итоги пакетной обработки
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// всего строк
    pub total: usize,
    /// строк, которые не удалось отформатировать
    pub failed: usize,
}

impl AmountRecord {
    /// Конфигурация для этой строки
    pub fn configuration(&self, base: &Configuration) -> Configuration {
        if self.currency.trim().is_empty() {
            base.clone()
        } else {
            base.clone().with_currency(self.currency.trim())
        }
    }
}

/// Читает все строки CSV с заголовком `currency,amount`
pub fn read_records<R: Read>(reader: R) -> Result<Vec<AmountRecord>, ParseError> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Форматирует каждую строку входного CSV и пишет `currency,amount,display`.
///
/// Строки с некорректной суммой получают пустой `display` и учитываются в [`BatchSummary::failed`].
pub fn render_csv<R: Read, W: Write>(
    reader: R,
    writer: W,
    base: &Configuration,
) -> Result<BatchSummary, ParseError> {
    let records = read_records(reader)?;
    let mut wtr = WriterBuilder::new().from_writer(writer);
    let mut summary = BatchSummary::default();

    for (i, record) in records.iter().enumerate() {
        let config = record.configuration(base);
        let display = match try_render(&record.amount, &config) {
            Ok(display) => display,
            Err(err) => {
                warn!("row {i}: {err}");
                summary.failed += 1;
                String::new()
            }
        };

        wtr.serialize(DisplayRecord {
            currency: &config.currency_code,
            amount: &record.amount,
            display: &display,
        })?;
        summary.total += 1;
    }

    wtr.flush()?;
    info!("rendered {} rows, {} failed", summary.total, summary.failed);
    Ok(summary)
}

/// Проверяет идемпотентность: повторное форматирование
/// нормализованного результата должно давать тот же результат
pub fn check_roundtrip(raw: &str, config: &Configuration) -> Result<(), ParseError> {
    let first = try_render(raw, config)?;
    let second = render(&normalize(&first, config.currency_at_end), config);

    if first != second {
        return Err(ParseError::RoundTrip {
            raw: raw.to_string(),
            first,
            second,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "currency,amount\nUSD,1340\nVND,134000.4\n,-50.25\nUSD,oops\n";

    #[test]
    fn reads_records_with_empty_currency() {
        let records = read_records(INPUT.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[2], AmountRecord { currency: String::new(), amount: "-50.25".into() });
    }

    #[test]
    fn record_falls_back_to_base_currency() {
        let base = Configuration::default().with_currency("KHR");
        let record = AmountRecord { currency: " ".into(), amount: "1".into() };
        assert_eq!(record.configuration(&base).currency_code, "KHR");
    }

    #[test]
    fn render_csv_writes_display_column() {
        let base = Configuration::default().with_show_currency(true);
        let mut out = Vec::new();
        let summary = render_csv(INPUT.as_bytes(), &mut out, &base).unwrap();

        assert_eq!(summary, BatchSummary { total: 4, failed: 1 });
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "currency,amount,display");
        assert_eq!(lines[1], "USD,1340,\"1,340.00 USD\"");
        assert_eq!(lines[2], "VND,134000.4,\"134,000 VND\"");
        assert_eq!(lines[3], ",-50.25,-50.25");
        assert_eq!(lines[4], "USD,oops,");
    }

    #[test]
    fn check_roundtrip_accepts_valid_amounts() {
        let config = Configuration::default().with_currency("USD").with_show_currency(true);
        check_roundtrip("1234.567", &config).unwrap();
        check_roundtrip("-0.005", &config.with_currency_at_end(false)).unwrap();
    }

    #[test]
    fn check_roundtrip_propagates_parse_error() {
        let err = check_roundtrip("x", &Configuration::default()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAmount(_)));
    }

    #[test]
    fn check_roundtrip_reports_currency_with_space() {
        // код валюты с пробелом ломает разбор по первому пробелу
        let config = Configuration::default()
            .with_currency("US D")
            .with_show_currency(true)
            .with_currency_at_end(false);
        let err = check_roundtrip("10", &config).unwrap_err();
        assert!(matches!(err, ParseError::RoundTrip { .. }));
    }
}
