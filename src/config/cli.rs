use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output formats the `mqp` binary can write examples in.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jsonl,
    Parquet,
}

// Define command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Load the Medical Question Pairs dataset", long_about = None)]
pub struct Args {
    /// Dataset configuration to generate: "source" or "bigbio"
    #[arg(short, long, default_value = "source")]
    pub config: String,

    /// Override the CSV locator (URL or local path) for the chosen configuration
    #[arg(short, long)]
    pub locator: Option<String>,

    /// Optional loader settings YAML file
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Jsonl)]
    pub format: OutputFormat,

    /// Output file. JSON Lines go to stdout when omitted; required for parquet.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop after this many examples
    #[arg(long)]
    pub limit: Option<usize>,

    /// Number of examples buffered per write
    #[arg(long, default_value_t = 500)]
    pub batch_size: usize,

    /// Print the dataset info and splits as JSON and exit
    #[arg(long)]
    pub describe: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let args = Args::try_parse_from(["mqp"]).unwrap();
        assert_eq!(args.config, "source");
        assert_eq!(args.format, OutputFormat::Jsonl);
        assert_eq!(args.batch_size, 500);
        assert!(!args.describe);
    }

    #[test]
    fn parquet_with_output() {
        let args =
            Args::try_parse_from(["mqp", "-c", "bigbio", "-f", "parquet", "-o", "out.parquet"])
                .unwrap();
        assert_eq!(args.config, "bigbio");
        assert_eq!(args.format, OutputFormat::Parquet);
        assert_eq!(args.output, Some(PathBuf::from("out.parquet")));
    }
}
