// src/config.rs

pub mod builder; // Dataset configurations and card metadata
pub mod cli;
pub mod loader; // YAML loader settings

pub use builder::{BuilderConfig, Configuration, BUILDER_CONFIGS, DEFAULT_CONFIG_NAME};
pub use loader::{load_loader_settings, LoaderSettings, LocatorOverrides};
