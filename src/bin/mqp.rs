// src/bin/mqp.rs

//! # mqp
//!
//! Command-line front end for the Medical Question Pairs dataset.
//!
//! 1.  **Describing**: with `--describe`, prints the dataset card (description,
//!     citation, features) and the split list for the chosen configuration as JSON.
//!
//! 2.  **Generating**: otherwise fetches the CSV (over HTTP, from the download
//!     cache or from a local path) and writes every example of the train split
//!     as JSON Lines (stdout by default) or to a Parquet file.
//!
//! Logs go to stderr through `tracing`, so stdout stays clean for JSON Lines.
//! Set `RUST_LOG` to change the level.

use std::fs::File;
use std::io;
use std::time::Instant;

use clap::Parser;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use mqp_loader::config::cli::{Args, OutputFormat};
use mqp_loader::config::{load_loader_settings, Configuration, LoaderSettings};
use mqp_loader::dataset::MqpDataset;
use mqp_loader::error::{DatasetError, Result};
use mqp_loader::pipeline::writers::{BaseWriter, JsonLinesWriter, ParquetWriter};

/// Creates a spinner on stderr for a run whose example count is not known up front.
fn create_progress_bar(message: &str, template: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb
}

/// Streams examples from `dataset` into `writer` in batches of `batch_size`,
/// stopping after `limit` examples when given. Returns the number written.
fn write_examples<W: BaseWriter>(
    dataset: &MqpDataset,
    mut writer: W,
    batch_size: usize,
    limit: Option<usize>,
    pb: &ProgressBar,
) -> Result<u64> {
    let mut batch = Vec::with_capacity(batch_size);
    let mut written = 0u64;

    let examples = dataset.examples()?.take(limit.unwrap_or(usize::MAX));
    for result in examples {
        let (_, example) = result?;
        batch.push(example);
        if batch.len() >= batch_size {
            writer.write_batch(&batch)?;
            written += batch.len() as u64;
            pb.inc(batch.len() as u64);
            batch.clear();
        }
    }
    if !batch.is_empty() {
        writer.write_batch(&batch)?;
        written += batch.len() as u64;
        pb.inc(batch.len() as u64);
    }
    writer.close()?;
    Ok(written)
}

fn describe(dataset: &MqpDataset) -> Result<()> {
    let description = serde_json::json!({
        "info": dataset.info(),
        "splits": dataset.split_generators(),
    });
    println!("{}", serde_json::to_string_pretty(&description)?);
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    if args.batch_size == 0 {
        return Err(DatasetError::ConfigValidationError(
            "--batch-size must be greater than 0".to_string(),
        ));
    }

    let settings = match &args.settings {
        Some(path) => {
            info!("Loading loader settings from: {}", path.display());
            load_loader_settings(path)?
        }
        None => LoaderSettings::default(),
    };

    let config: Configuration = args.config.parse()?;
    let mut dataset = MqpDataset::from_settings(config, settings)?;
    if let Some(locator) = &args.locator {
        dataset = dataset.with_locator(locator.clone());
    }

    if args.describe {
        return describe(&dataset);
    }

    info!("Configuration: {}", dataset.config());
    info!("Locator: {}", dataset.locator());

    let pb = create_progress_bar(
        "Generating examples",
        "{spinner:.green} [{elapsed_precise}] {msg} Examples written: {pos} ({per_sec})",
    );
    let start = Instant::now();

    let written = match (args.format, &args.output) {
        (OutputFormat::Jsonl, Some(path)) => {
            let writer = JsonLinesWriter::new(File::create(path)?);
            write_examples(&dataset, writer, args.batch_size, args.limit, &pb)
        }
        (OutputFormat::Jsonl, None) => {
            let writer = JsonLinesWriter::new(io::stdout().lock());
            write_examples(&dataset, writer, args.batch_size, args.limit, &pb)
        }
        (OutputFormat::Parquet, Some(path)) => {
            let writer = ParquetWriter::new(path, config)?;
            write_examples(&dataset, writer, args.batch_size, args.limit, &pb)
        }
        (OutputFormat::Parquet, None) => Err(DatasetError::ConfigError(
            "--output is required for parquet output".to_string(),
        )),
    };

    match written {
        Ok(count) => {
            pb.finish_with_message(format!("Done in {}", HumanDuration(start.elapsed())));
            info!("--------------------");
            info!("  Examples written: {}", count);
            if let Some(path) = &args.output {
                info!("  Output File: {}", path.display());
            }
            info!("--------------------");
            Ok(())
        }
        Err(e) => {
            pb.abandon_with_message(format!("Generation failed: {}", e));
            Err(e)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber on stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")); // Default to info if RUST_LOG is not set
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&args) {
        error!("mqp failed: {}", e);
        return Err(e);
    }
    Ok(())
}
