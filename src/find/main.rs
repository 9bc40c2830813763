//! Command-line neighborhood lookup.
//!
//! Loads the street table and prints the ranges covering one address:
//!
//! ```text
//! find 123 main st
//! find --address "123 Main Street #4, San Francisco"
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use neighborhood::config::Config;
use neighborhood::{load_index, parse_street_address, AddressRecord};

#[derive(Parser, Debug)]
#[command(name = "find")]
#[command(about = "Find the San Francisco neighborhood of a street address")]
struct Args {
    /// House number
    #[arg(required_unless_present = "address", allow_negative_numbers = true)]
    house_number: Option<i64>,

    /// Street name, e.g. "main" or "van ness"
    #[arg(required_unless_present = "address")]
    street_name: Option<String>,

    /// Street type, e.g. "st" or "ave"
    #[arg(required_unless_present = "address")]
    street_type: Option<String>,

    /// Free-form address instead of the three positional arguments
    #[arg(long, conflicts_with_all = ["house_number", "street_name", "street_type"])]
    address: Option<String>,

    /// Street table (plain or gzip-compressed TSV)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print matches as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries results
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref())?;
    let data = args.data.unwrap_or(config.data.path);

    let index = load_index(&data)
        .with_context(|| format!("Failed to load street data from {}", data.display()))?;

    let (number, name, street_type) = match &args.address {
        Some(address) => {
            let parsed = parse_street_address(address)
                .with_context(|| format!("Cannot parse address {:?}", address))?;
            (parsed.number, parsed.name, parsed.street_type)
        }
        None => (
            args.house_number.context("missing house number")?,
            args.street_name.unwrap_or_default(),
            args.street_type.unwrap_or_default(),
        ),
    };

    info!("Looking up {} {} {}", number, name, street_type);
    let matches = index.find_matches(number, &name, &street_type);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for record in &matches {
            println!("{}", format_record(record));
        }
    }

    if matches.is_empty() {
        eprintln!("no matching neighborhood");
    }

    Ok(())
}

fn format_record(record: &AddressRecord) -> String {
    format!(
        "{}\t{}\t{} {}-{}",
        record.district,
        record.neighborhood,
        record.parity.code(),
        record.low,
        record.high
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use neighborhood::ParityRule;

    #[test]
    fn test_format_record() {
        let record = AddressRecord::new(ParityRule::EvenOnly, 100, 200, 5, "Downtown");
        assert_eq!(format_record(&record), "5\tDowntown\tE 100-200");

        let record = AddressRecord::new(ParityRule::Any, 0, 0, 4, "Inner Sunset");
        assert_eq!(format_record(&record), "4\tInner Sunset\tA 0-0");
    }
}
