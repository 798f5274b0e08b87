use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;

use daybook::{
    AccountId, DateKey, Ledger, Record, RecordType, gateway::SQLiteGateway, initialize_db,
    navigation::month_bounds,
};

/// A utility for creating a test database for the daybook CLI.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The account to create sample records for.
    #[arg(long, short, default_value = "test")]
    account: String,

    /// A date in the month to fill with sample records, as yyyy-MM-dd.
    #[arg(long, value_parser = DateKey::parse)]
    month: DateKey,
}

/// Create and populate a database for manual testing.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let gateway = SQLiteGateway::new(Arc::new(Mutex::new(conn)));
    let ledger = Ledger::new(Arc::new(gateway), AccountId::new(args.account));
    let month = month_bounds(args.month);

    println!(
        "Creating sample records for {} from {} to {}...",
        ledger.account(),
        month.start,
        month.end
    );

    for (index, date) in month.days().enumerate() {
        for record in sample_records(index) {
            ledger.add_record(date, &record).await?;
        }
    }

    println!("Success!");

    Ok(())
}

/// A repeating weekly pattern of records for the day at `index` in the month.
fn sample_records(index: usize) -> Vec<Record> {
    let mut records = vec![Record::new(
        RecordType::Expense,
        (5 + index % 4 * 3).to_string(),
        "Coffee",
    )];

    match index % 7 {
        0 => records.push(Record::new(RecordType::Income, "850", "Pay")),
        2 => records.push(Record::new(RecordType::Expense, "120", "Groceries")),
        5 => records.push(Record::new(RecordType::Expense, "45", "Dinner out")),
        _ => {}
    }

    if index == 0 {
        records.push(Record::new(RecordType::Expense, "400", "Rent"));
    }

    records
}
