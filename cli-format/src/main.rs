use clap::{Parser, ValueEnum};
use moneyfmt::{Configuration, ParseError, normalize, try_render};
use std::io::{self, BufRead, Write};
use std::process;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(
    name = "cli_format",
    version,
    about = "Форматирует денежные суммы или восстанавливает их сырое значение.",
    long_about = None,
)]
struct Args {
    /// Режим работы
    #[arg(long, value_enum, default_value_t = Mode::Render)]
    mode: Mode,

    /// Код валюты
    #[arg(long, default_value = "")]
    currency: String,

    /// Показывать код валюты
    #[arg(long)]
    show_currency: bool,

    /// Код валюты перед суммой
    #[arg(long)]
    currency_at_start: bool,

    /// Не убирать дробную часть у VND и KHR
    #[arg(long)]
    no_simplify: bool,

    /// Отбрасывать знак
    #[arg(long)]
    abs: bool,

    /// Значения; если не заданы - читаются построчно из stdin
    values: Vec<String>,
}

/// Что делать с каждым значением
#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    /// сырое значение -> отображаемая строка
    Render,
    /// отображаемая строка -> сырое значение
    Raw,
}

impl Args {
    fn configuration(&self) -> Configuration {
        Configuration::default()
            .with_currency(self.currency.as_str())
            .with_show_currency(self.show_currency)
            .with_currency_at_end(!self.currency_at_start)
            .with_simplify_amount(!self.no_simplify)
            .with_absolute_value(self.abs)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(0) => {}
        Ok(failed) => {
            eprintln!("{failed} value(s) could not be formatted");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}

fn convert(mode: Mode, value: &str, config: &Configuration) -> Result<String, ParseError> {
    match mode {
        Mode::Render => try_render(value, config),
        Mode::Raw => Ok(normalize(value, config.currency_at_end)),
    }
}

/// Пишет по строке на каждое значение, неудачные - пустой строкой.
///
/// Возвращает число неудачных значений.
fn write_lines<W: Write>(
    mode: Mode,
    values: &[String],
    config: &Configuration,
    mut writer: W,
) -> Result<usize, ParseError> {
    let mut failed = 0;
    for value in values {
        let line = convert(mode, value.trim(), config).unwrap_or_else(|err| {
            warn!("{value:?}: {err}");
            failed += 1;
            String::new()
        });
        writeln!(writer, "{line}")?;
    }
    Ok(failed)
}

fn run() -> Result<usize, ParseError> {
    let args = Args::parse();
    let config = args.configuration();

    let values: Vec<String> = if args.values.is_empty() {
        io::stdin().lock().lines().collect::<Result<_, _>>()?
    } else {
        args.values.clone()
    };

    let stdout = io::stdout();
    let handle = stdout.lock();

    write_lines(args.mode, &values, &config, handle)
}
