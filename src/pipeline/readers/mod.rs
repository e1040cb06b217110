// src/pipeline/readers/mod.rs

pub mod base_reader;
pub mod http_csv_reader;
pub mod memory_reader;

pub use base_reader::{CsvFetcher, Row, SplitRows};
pub use http_csv_reader::HttpCsvFetcher;
pub use memory_reader::InMemoryCsvFetcher;
