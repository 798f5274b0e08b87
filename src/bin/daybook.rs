use std::{error::Error, path::PathBuf, process::exit};

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use daybook::{
    AccountId, Config, DateKey, Ledger, Record, RecordType,
    chart::daily_totals_chart,
    format_currency,
    gateway::SQLiteGateway,
    logging::setup_logging,
    navigation::{month_bounds, step_day, step_month},
    view_state::HomeView,
};

/// A command line ledger of dated income and expense records.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database. Created if it does not exist.
    #[arg(long)]
    db_path: PathBuf,

    /// The account to read and write records for.
    #[arg(long, short)]
    account: String,

    /// The local timezone as a canonical name, e.g. "Pacific/Auckland". Determines today's date.
    #[arg(long, default_value = daybook::DEFAULT_TIMEZONE)]
    timezone: String,

    /// Also write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a record to a day.
    Add(RecordArgs),
    /// Delete one matching record from a day.
    Delete(RecordArgs),
    /// Show the records and totals for a day.
    Day {
        #[command(flatten)]
        date: DateArgs,
        /// Move this many days from the date before showing it.
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
    },
    /// Show every record in a month, grouped by day.
    Month(MonthArgs),
    /// Show the income, expense and net totals for a month.
    Summary(MonthArgs),
    /// Print the daily totals chart for a month as JSON.
    Chart {
        #[command(flatten)]
        month: MonthArgs,
        /// Canvas width in pixels. Defaults to 600.
        #[arg(long)]
        width: Option<f64>,
        /// Canvas height in pixels. Defaults to 400.
        #[arg(long)]
        height: Option<f64>,
        /// Print ECharts options instead of canvas geometry.
        #[arg(long)]
        echarts: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct DateArgs {
    /// The date as yyyy-MM-dd. Defaults to today.
    #[arg(long, value_parser = DateKey::parse)]
    date: Option<DateKey>,
}

#[derive(ClapArgs, Debug)]
struct MonthArgs {
    #[command(flatten)]
    date: DateArgs,
    /// Move this many months from the date's month.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    month_offset: i32,
}

#[derive(ClapArgs, Debug)]
struct RecordArgs {
    #[command(flatten)]
    date: DateArgs,
    /// Whether the record is income or an expense.
    #[arg(long = "type", value_enum)]
    record_type: RecordTypeArg,
    /// The whole-number amount.
    #[arg(long)]
    amount: String,
    /// What the record was for.
    #[arg(long)]
    description: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RecordTypeArg {
    Income,
    Expense,
}

impl From<RecordTypeArg> for RecordType {
    fn from(value: RecordTypeArg) -> Self {
        match value {
            RecordTypeArg::Income => RecordType::Income,
            RecordTypeArg::Expense => RecordType::Expense,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = Config::new(args.db_path, AccountId::new(args.account))
        .with_timezone(&args.timezone)?
        .with_log_file(args.log_file);

    setup_logging(config.log_file.as_deref())?;

    let ledger = config.open_ledger()?;
    let resolve = |date: &DateArgs| date.date.map_or_else(|| config.today(), Ok);

    match args.command {
        Command::Add(record_args) => {
            let date = resolve(&record_args.date)?;
            add_record(&ledger, date, record_args).await?;
        }
        Command::Delete(record_args) => {
            let date = resolve(&record_args.date)?;
            let record = Record::new(
                record_args.record_type.into(),
                record_args.amount,
                record_args.description,
            );
            ledger.delete_record(date, &record).await?;
            println!("Deleted {record} from {date}");
        }
        Command::Day { date, offset } => {
            let date = step_day(resolve(&date)?, offset);
            show_day(&ledger, date).await;
        }
        Command::Month(month) => {
            let date = step_month(resolve(&month.date)?, month.month_offset);
            show_month(&ledger, date).await;
        }
        Command::Summary(month) => {
            let date = step_month(resolve(&month.date)?, month.month_offset);
            show_summary(&ledger, date).await;
        }
        Command::Chart {
            month,
            width,
            height,
            echarts,
        } => {
            let date = step_month(resolve(&month.date)?, month.month_offset);

            if echarts {
                let series = ledger.month_series(date).await;
                println!("{}", daily_totals_chart(&series, month_bounds(date)));
            } else {
                let width = width.unwrap_or(config.canvas.width);
                let height = height.unwrap_or(config.canvas.height);
                let geometry = ledger.month_chart(date, width, height).await;
                println!("{}", serde_json::to_string_pretty(&geometry)?);
            }
        }
    }

    Ok(())
}

async fn add_record(
    ledger: &Ledger<SQLiteGateway>,
    date: DateKey,
    record_args: RecordArgs,
) -> Result<(), Box<dyn Error>> {
    let mut view = HomeView::new(date);
    view.select_type(record_args.record_type.into());
    view.input_description(&record_args.description);

    if !view.input_amount(&record_args.amount) {
        eprintln!(
            "Amount must be a whole number made of digits only, got {:?}.",
            record_args.amount
        );
        exit(1);
    }

    match ledger.submit(&mut view).await? {
        Some(record) => println!("Added {record} to {date}"),
        None => {
            eprintln!("Both an amount and a description are required.");
            exit(1);
        }
    }

    Ok(())
}

async fn show_day(ledger: &Ledger<SQLiteGateway>, date: DateKey) {
    let mut view = HomeView::new(date);
    ledger.refresh(&mut view).await;

    println!("Date: {date}");
    println!("Records:");
    for record in &view.records {
        println!("  {record}");
    }

    let summary = view.daily_summary();
    println!("Net: {}", format_currency(summary.net));
}

async fn show_month(ledger: &Ledger<SQLiteGateway>, date: DateKey) {
    let month = month_bounds(date);
    let days = ledger.month_ledger(date).await;

    println!("{} to {}", month.start, month.end);
    for (day, records) in days {
        println!("{day}");
        for record in records {
            println!("  {record}");
        }
    }
}

async fn show_summary(ledger: &Ledger<SQLiteGateway>, date: DateKey) {
    let month = month_bounds(date);
    let summary = ledger.month_summary(date).await;

    println!("{} to {}", month.start, month.end);
    println!("Income:  {}", format_currency(summary.total_income));
    println!("Expense: {}", format_currency(summary.total_expense));
    println!("Net:     {}", format_currency(summary.net));
}
