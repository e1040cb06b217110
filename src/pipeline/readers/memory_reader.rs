use tracing::debug;

use crate::data_model::Split;
use crate::error::Result;
use crate::pipeline::readers::base_reader::{read_rows, CsvFetcher, SplitRows};

/// Serves CSV text held in memory, whatever locator is asked for.
#[derive(Debug, Clone)]
pub struct InMemoryCsvFetcher {
    data: String,
    delimiter: u8,
}

impl InMemoryCsvFetcher {
    pub fn new(data: impl Into<String>) -> Self {
        InMemoryCsvFetcher {
            data: data.into(),
            delimiter: b',',
        }
    }

    /// Builds the CSV body from one string per line.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut data = String::new();
        for line in lines {
            data.push_str(line.as_ref());
            data.push('\n');
        }
        InMemoryCsvFetcher::new(data)
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl CsvFetcher for InMemoryCsvFetcher {
    fn fetch_csv(&self, locator: &str, column_names: &[&str]) -> Result<SplitRows> {
        let rows = read_rows(self.data.as_bytes(), self.delimiter, column_names.len())?;
        debug!(locator, rows = rows.len(), "Parsed in-memory CSV");
        let mut splits = SplitRows::new();
        splits.insert(Split::Train.as_str(), rows);
        Ok(splits)
    }
}
