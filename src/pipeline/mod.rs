// src/pipeline/mod.rs

pub mod readers; // CSV fetchers
pub mod writers; // Materialization of generated examples
