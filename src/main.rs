//! EFT Generator CLI
//!
//! Reads payment segments from a CSV file and writes a CPA-005 file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --originator-id 0123456789 --file-creation-number 1 \
//!     --originator-long-name "The City of Example" payments.csv > payments.cpa
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use chrono::NaiveDate;
use clap::Parser;
use eft_generator::{Currency, EftConfiguration, EftGenerator, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

/// Generate a CPA-005 EFT file from a CSV of payment segments
#[derive(Parser, Debug)]
#[command(name = "eft-generator", version, about, long_about = None)]
struct Cli {
    /// Input CSV file with one payment segment per row
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Originator's id (client number), at most 10 characters
    #[arg(long)]
    originator_id: String,

    /// File creation number, 1 to 4 digits
    #[arg(long)]
    file_creation_number: String,

    /// Originator's long name, truncated to 30 characters
    #[arg(long)]
    originator_long_name: String,

    /// Originator's short name, truncated to 15 characters (defaults to the long name)
    #[arg(long)]
    originator_short_name: Option<String>,

    /// File creation date, YYYY-MM-DD (defaults to today)
    #[arg(long, value_name = "DATE")]
    creation_date: Option<NaiveDate>,

    /// Destination data centre, up to 5 digits
    #[arg(long)]
    data_centre: Option<String>,

    /// Destination currency: CAD or USD
    #[arg(long, value_parser = parse_currency)]
    currency: Option<Currency>,

    /// Institution number for returned items
    #[arg(long)]
    return_institution: Option<String>,

    /// Transit number for returned items
    #[arg(long)]
    return_transit: Option<String>,

    /// Account number for returned items
    #[arg(long)]
    return_account: Option<String>,

    /// Write the file here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only validate the input and report warnings
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn configuration(&self) -> EftConfiguration {
        let mut config = EftConfiguration::new(
            self.originator_id.clone(),
            self.file_creation_number.clone(),
            self.originator_long_name.clone(),
        );
        config.originator_short_name = self.originator_short_name.clone();
        config.file_creation_date = self.creation_date;
        config.destination_data_centre = self.data_centre.clone();
        config.destination_currency = self.currency;
        config.return_institution_number = self.return_institution.clone();
        config.return_transit_number = self.return_transit.clone();
        config.return_account_number = self.return_account.clone();
        config
    }
}

fn parse_currency(value: &str) -> std::result::Result<Currency, String> {
    value.parse().map_err(|e: eft_generator::EftError| e.to_string())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut generator = EftGenerator::new(cli.configuration());

    let file = File::open(&cli.input)?;
    generator.load_csv(BufReader::new(file))?;

    // no output file is created for input that cannot be generated
    for warning in generator.validate()? {
        eprintln!("warning: {}", warning);
    }

    if cli.check {
        println!("OK");
        return Ok(());
    }

    match &cli.output {
        Some(path) => generator.write_output(BufWriter::new(File::create(path)?)),
        None => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            generator.write_output(handle)
        }
    }
}
