// Declare the writer modules
pub mod base_writer;
pub mod jsonl_writer;
pub mod parquet_writer;

pub use base_writer::BaseWriter;
pub use jsonl_writer::JsonLinesWriter;
pub use parquet_writer::ParquetWriter;
