use clap::Parser;
use moneyfmt::batch::read_records;
use moneyfmt::{Configuration, ParseError, check_roundtrip, render_csv};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "cli_batch",
    version,
    about = "Форматирует CSV-файл с колонками currency,amount.",
    long_about = None,
)]
struct Args {
    /// Входной CSV-файл
    #[arg(long)]
    input: PathBuf,

    /// Код валюты для строк без валюты
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

    /// Только проверить, что форматирование обратимо
    #[arg(long)]
    check: bool,
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

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

/// Печатает строки, нарушающие обратимость; возвращает true, если таких нет
fn check_file(file: File, base: &Configuration) -> Result<bool, ParseError> {
    let mut ok = true;

    for (i, record) in read_records(io::BufReader::new(file))?.iter().enumerate() {
        let config = record.configuration(base);
        if let Err(err) = check_roundtrip(&record.amount, &config) {
            println!("Строка {i}: {err}");
            ok = false;
        }
    }

    if ok {
        println!("all rows round-trip");
    }
    Ok(ok)
}

fn run() -> Result<(), ParseError> {
    let args = Args::parse();
    let config = args.configuration();

    if !args.input.exists() {
        eprintln!("input file does not exist: {}", args.input.display());
        process::exit(1)
    }

    let file = File::open(&args.input).unwrap_or_else(|err| {
        eprintln!("failed to open input file {}: {err}", args.input.display());
        process::exit(1);
    });

    if args.check {
        if !check_file(file, &config)? {
            process::exit(2);
        }
        return Ok(());
    }

    let stdout = io::stdout();
    let handle = stdout.lock();

    let summary = render_csv(io::BufReader::new(file), handle, &config)?;
    if summary.failed > 0 {
        eprintln!("{} of {} rows could not be formatted", summary.failed, summary.total);
    }

    Ok(())
}
