// Declare the modules that form the library's public API
pub mod config;
pub mod data_model;
pub mod dataset;
pub mod error;
pub mod pipeline;

pub use config::Configuration;
pub use data_model::{BigBioPairRecord, Example, Features, SourceRecord, Split, SplitGenerator};
pub use dataset::{describe, generate_examples, resolve_splits, MqpDataset};
pub use error::{DatasetError, Result};
pub use pipeline::readers::{CsvFetcher, HttpCsvFetcher, InMemoryCsvFetcher, SplitRows};
