//! Headless front end: load the dataset and rank labels for the symptoms
//! given on the command line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rare_disease_assistant::{diagnose, load_settings, logging, DatasetCache, Loader, QueryError};

#[derive(Parser, Debug)]
#[command(name = "diagnose", version, about = "Rank diseases matching a set of symptoms")]
struct Args {
    /// Settings file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Symptom column to match; repeat for several.
    #[arg(short, long = "symptom")]
    symptoms: Vec<String>,

    /// Print the available symptom columns and exit.
    #[arg(long)]
    list: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;
    logging::init(settings.logging.file.as_deref())?;

    let loader = Loader::from_settings(&settings);
    let mut cache = DatasetCache::new();
    let dataset = match cache.get_or_load(&loader) {
        Ok(ds) => ds,
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.list {
        for name in dataset.feature_columns() {
            println!("{name}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let result = match diagnose(&dataset, &args.symptoms) {
        Ok(result) => result,
        Err(QueryError::EmptySelection) => {
            eprintln!("⚠️ Please select at least one symptom (--symptom NAME).");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            eprintln!("⚠️ {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(ExitCode::SUCCESS);
    }

    match result.top() {
        Some(top) => {
            println!("✅ Most likely disease: {}", top.label);
            println!();
            println!("{:<40} {:>8}", "Disease", "Count");
            for entry in &result.entries {
                println!("{:<40} {:>8}", entry.label, entry.count);
            }
        }
        None => println!("⚠️ No clear match found. Try selecting different symptoms."),
    }
    Ok(ExitCode::SUCCESS)
}
