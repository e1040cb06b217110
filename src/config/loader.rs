use crate::config::builder::Configuration;
use crate::error::{DatasetError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for fetching the dataset, read from YAML. Every field has a default,
/// so an empty document is a valid configuration.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderSettings {
    pub delimiter: char,
    pub timeout_secs: u64,
    pub user_agent: String,
    // Downloads are cached here when set.
    pub cache_dir: Option<PathBuf>,
    pub force_download: bool,
    pub locators: LocatorOverrides,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        LoaderSettings {
            delimiter: ',',
            timeout_secs: 60,
            user_agent: format!("mqp-loader/{}", env!("CARGO_PKG_VERSION")),
            cache_dir: None,
            force_download: false,
            locators: LocatorOverrides::default(),
        }
    }
}

/// Optional replacements for the built-in CSV locators, per configuration.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LocatorOverrides {
    pub source: Option<String>,
    pub bigbio: Option<String>,
}

impl LoaderSettings {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(DatasetError::ConfigValidationError(
                "LoaderSettings: timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(DatasetError::ConfigValidationError(format!(
                "LoaderSettings: delimiter must be a single ASCII character other than a quote or newline, got {:?}",
                self.delimiter
            )));
        }
        for (name, locator) in [
            ("source", &self.locators.source),
            ("bigbio", &self.locators.bigbio),
        ] {
            if let Some(locator) = locator {
                if locator.trim().is_empty() {
                    return Err(DatasetError::ConfigValidationError(format!(
                        "LoaderSettings: locator override for '{}' must not be empty",
                        name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Locator for `config`: the override if one is set, else the built-in URL.
    pub fn locator_for(&self, config: Configuration) -> String {
        let override_locator = match config {
            Configuration::Source => self.locators.source.as_ref(),
            Configuration::Bigbio => self.locators.bigbio.as_ref(),
        };
        override_locator
            .cloned()
            .unwrap_or_else(|| config.default_locator().to_string())
    }

    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII; fall back to a comma for unvalidated settings.
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}

/// Loads, parses and validates a loader settings YAML file.
pub fn load_loader_settings<P: AsRef<Path>>(settings_path: P) -> Result<LoaderSettings> {
    let path_ref = settings_path.as_ref();
    let content = fs::read_to_string(path_ref).map_err(|e| {
        DatasetError::ConfigError(format!(
            "Failed to read loader settings file '{}': {}",
            path_ref.display(),
            e
        ))
    })?;

    // serde_yaml reads an empty document as null rather than an empty mapping.
    let settings: LoaderSettings = if content.trim().is_empty() {
        LoaderSettings::default()
    } else {
        serde_yaml::from_str(&content).map_err(|e| {
            DatasetError::ConfigError(format!(
                "Failed to parse loader settings YAML from '{}': {}",
                path_ref.display(),
                e
            ))
        })?
    };

    settings.validate()?;
    Ok(settings)
}
