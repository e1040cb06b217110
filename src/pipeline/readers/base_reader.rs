use std::io::Read;

use tracing::debug;

use crate::error::Result;

pub type Row = Vec<String>;

/// Rows of a fetched CSV grouped by split name, in the order the fetcher produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitRows {
    splits: Vec<(String, Vec<Row>)>,
}

impl SplitRows {
    pub fn new() -> Self {
        SplitRows::default()
    }

    /// Inserts rows for `split`, replacing any rows already stored under that name.
    pub fn insert(&mut self, split: impl Into<String>, rows: Vec<Row>) {
        let split = split.into();
        match self.splits.iter_mut().find(|(name, _)| *name == split) {
            Some((_, existing)) => *existing = rows,
            None => self.splits.push((split, rows)),
        }
    }

    pub fn get(&self, split: &str) -> Option<&[Row]> {
        self.splits
            .iter()
            .find(|(name, _)| name == split)
            .map(|(_, rows)| rows.as_slice())
    }

    pub fn split_names(&self) -> Vec<&str> {
        self.splits.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn total_rows(&self) -> usize {
        self.splits.iter().map(|(_, rows)| rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_rows() == 0
    }
}

impl IntoIterator for SplitRows {
    type Item = (String, Vec<Row>);
    type IntoIter = std::vec::IntoIter<(String, Vec<Row>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.splits.into_iter()
    }
}

/// Retrieves a CSV resource and splits it into named row groups.
///
/// Rows are positional: value `i` belongs to `column_names[i]`. Fetchers drop
/// values past `column_names.len()` but never pad a short row.
pub trait CsvFetcher {
    fn fetch_csv(&self, locator: &str, column_names: &[&str]) -> Result<SplitRows>;
}

/// Parses header-less CSV from `input` into rows, keeping at most `max_columns` values per row.
///
/// Record lengths may vary so that short rows reach the caller intact.
pub fn read_rows<R: Read>(input: R, delimiter: u8, max_columns: usize) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > max_columns {
            debug!(
                line = record.position().map(|p| p.line()),
                columns = record.len(),
                "Dropping values past the named columns"
            );
        }
        rows.push(
            record
                .iter()
                .take(max_columns)
                .map(|field| field.to_string())
                .collect(),
        );
    }
    Ok(rows)
}
