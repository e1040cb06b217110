use tracing::{debug, info, warn};

use crate::config::builder::Configuration;
use crate::config::LoaderSettings;
use crate::data_model::{
    BigBioPairRecord, DatasetInfo, Example, Features, SourceRecord, Split, SplitGenerator,
    COLUMN_NAMES,
};
use crate::error::Result;
use crate::pipeline::readers::{CsvFetcher, HttpCsvFetcher, SplitRows};

/// The Medical Question Pairs dataset under one configuration.
///
/// The configuration is fixed at construction. Each call to
/// [`generate_examples`](MqpDataset::generate_examples) fetches the CSV afresh
/// through the fetcher and numbers the rows from zero again.
pub struct MqpDataset {
    config: Configuration,
    locator: String,
    fetcher: Box<dyn CsvFetcher>,
}

impl MqpDataset {
    pub fn new(config: Configuration, fetcher: Box<dyn CsvFetcher>) -> Self {
        MqpDataset {
            config,
            locator: config.default_locator().to_string(),
            fetcher,
        }
    }

    /// Builds a dataset for `config_name`, failing with `UnknownConfiguration` for any
    /// name other than "source" or "bigbio".
    pub fn from_name(config_name: &str, fetcher: Box<dyn CsvFetcher>) -> Result<Self> {
        Ok(MqpDataset::new(config_name.parse()?, fetcher))
    }

    /// Builds a dataset backed by [`HttpCsvFetcher`], honouring locator overrides in `settings`.
    pub fn from_settings(config: Configuration, settings: LoaderSettings) -> Result<Self> {
        let locator = settings.locator_for(config);
        let fetcher = HttpCsvFetcher::new(settings)?;
        Ok(MqpDataset::new(config, Box::new(fetcher)).with_locator(locator))
    }

    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = locator.into();
        self
    }

    pub fn config(&self) -> Configuration {
        self.config
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn info(&self) -> DatasetInfo {
        self.config.info()
    }

    pub fn features(&self) -> Features {
        self.config.features()
    }

    /// Always a single train split over this dataset's locator.
    pub fn split_generators(&self) -> Vec<SplitGenerator> {
        vec![SplitGenerator {
            name: Split::Train,
            locator: self.locator.clone(),
        }]
    }

    /// Fetches `locator` and yields `(index, example)` pairs in source row order.
    ///
    /// The index is one running cursor over every split the fetcher returns,
    /// in the fetcher's split order. Under bigbio the global id is `index + 1`.
    /// A row with fewer than four columns yields `MalformedRow` at its position.
    pub fn generate_examples(
        &self,
        locator: &str,
    ) -> Result<impl Iterator<Item = Result<(usize, Example)>>> {
        info!(config = %self.config, locator, "Generating examples");
        let splits = self.fetcher.fetch_csv(locator, &COLUMN_NAMES)?;

        if splits.is_empty() {
            warn!(locator, "Fetched CSV contains no rows");
        }
        for name in splits.split_names() {
            let rows = splits.get(name).map_or(0, |r| r.len());
            debug!(split = name, rows, "Fetched split");
        }

        Ok(examples_from(self.config, splits))
    }

    /// Generates examples for every split from [`split_generators`](MqpDataset::split_generators).
    pub fn examples(&self) -> Result<impl Iterator<Item = Result<(usize, Example)>>> {
        self.generate_examples(&self.locator)
    }
}

/// Schema of the configuration named `config_name`.
pub fn describe(config_name: &str) -> Result<Features> {
    let config: Configuration = config_name.parse()?;
    Ok(config.features())
}

/// Splits of the configuration named `config_name` over its built-in locator.
pub fn resolve_splits(config_name: &str) -> Result<Vec<SplitGenerator>> {
    let config: Configuration = config_name.parse()?;
    Ok(vec![SplitGenerator {
        name: Split::Train,
        locator: config.default_locator().to_string(),
    }])
}

/// Generates the examples of `config_name` from `locator` through `fetcher`.
///
/// The name is checked before anything is fetched.
pub fn generate_examples(
    config_name: &str,
    locator: &str,
    fetcher: &dyn CsvFetcher,
) -> Result<impl Iterator<Item = Result<(usize, Example)>>> {
    let config: Configuration = config_name.parse()?;
    let splits = fetcher.fetch_csv(locator, &COLUMN_NAMES)?;
    Ok(examples_from(config, splits))
}

fn examples_from(
    config: Configuration,
    splits: SplitRows,
) -> impl Iterator<Item = Result<(usize, Example)>> {
    splits
        .into_iter()
        .flat_map(|(_, rows)| rows)
        .enumerate()
        .map(move |(index, row)| {
            let record = SourceRecord::from_row(index, row)?;
            let example = match config {
                Configuration::Source => Example::Source(record),
                Configuration::Bigbio => {
                    Example::BigBio(BigBioPairRecord::from_source(index as u64 + 1, record))
                }
            };
            Ok((index, example))
        })
}
