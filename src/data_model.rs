use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::builder::Configuration;
use crate::error::{DatasetError, Result};

/// Column names assigned positionally on ingestion. The CSV carries no header row.
pub const COLUMN_NAMES: [&str; 4] = ["document_id", "text_1", "text_2", "label"];

/// One medical question pair as it appears in the source CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub document_id: String,
    pub text_1: String,
    pub text_2: String,
    /// "1" when the paraphrase is contextually similar, "0" otherwise.
    pub label: String,
}

impl SourceRecord {
    /// Builds a record from the first four columns of `row`.
    ///
    /// `row_index` is only used to report a short row. Columns past the fourth are ignored.
    pub fn from_row(row_index: usize, row: Vec<String>) -> Result<Self> {
        if row.len() < COLUMN_NAMES.len() {
            return Err(DatasetError::MalformedRow {
                row: row_index,
                expected: COLUMN_NAMES.len(),
                found: row.len(),
            });
        }
        let mut fields = row.into_iter();
        // Length checked above, so the four `next()` calls always yield.
        let mut take = || fields.next().unwrap_or_default();
        Ok(SourceRecord {
            document_id: take(),
            text_1: take(),
            text_2: take(),
            label: take(),
        })
    }
}

/// The same pair under the BigBio cross-dataset schema, with a global id starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigBioPairRecord {
    pub id: u64,
    pub document_id: String,
    pub text_1: String,
    pub text_2: String,
    pub label: String,
}

impl BigBioPairRecord {
    pub fn from_source(id: u64, record: SourceRecord) -> Self {
        BigBioPairRecord {
            id,
            document_id: record.document_id,
            text_1: record.text_1,
            text_2: record.text_2,
            label: record.label,
        }
    }
}

/// A generated example. Serializes flat, so the JSON object carries exactly
/// the fields of its configuration's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Example {
    // BigBio first: untagged deserialization tries variants in order and a
    // source-shaped match would otherwise swallow the `id` field.
    BigBio(BigBioPairRecord),
    Source(SourceRecord),
}

impl Example {
    pub fn configuration(&self) -> Configuration {
        match self {
            Example::Source(_) => Configuration::Source,
            Example::BigBio(_) => Configuration::Bigbio,
        }
    }

    pub fn document_id(&self) -> &str {
        match self {
            Example::Source(r) => &r.document_id,
            Example::BigBio(r) => &r.document_id,
        }
    }

    pub fn text_1(&self) -> &str {
        match self {
            Example::Source(r) => &r.text_1,
            Example::BigBio(r) => &r.text_1,
        }
    }

    pub fn text_2(&self) -> &str {
        match self {
            Example::Source(r) => &r.text_2,
            Example::BigBio(r) => &r.text_2,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Example::Source(r) => &r.label,
            Example::BigBio(r) => &r.label,
        }
    }

    /// Global id, present only under the bigbio schema.
    pub fn id(&self) -> Option<u64> {
        match self {
            Example::Source(_) => None,
            Example::BigBio(r) => Some(r.id),
        }
    }
}

/// Value types a feature column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    String,
    Int64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub dtype: FeatureType,
}

impl FieldSpec {
    pub const fn new(name: &'static str, dtype: FeatureType) -> Self {
        FieldSpec { name, dtype }
    }
}

/// Ordered field list of a configuration's output schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Features(Vec<FieldSpec>);

impl Features {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Features(fields)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|f| f.name).collect()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Named partition of a dataset. This dataset only ever has a train split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A split together with the resource its examples are generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitGenerator {
    pub name: Split,
    pub locator: String,
}

/// Descriptive metadata for one configuration of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub config_name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub homepage: &'static str,
    pub license: &'static str,
    pub citation: &'static str,
    pub features: Features,
}
