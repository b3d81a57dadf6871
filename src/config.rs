//! Configuration for the analysis pipeline.

use std::path::PathBuf;

/// Options controlling a pipeline run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the study's CSV exports (one table per file).
    pub data_dir: PathBuf,

    /// Drop participants who failed any catch check from the merged analysis
    /// table. Defaults to true.
    pub exclude_failed: bool,
}

impl Config {
    /// Configuration with defaults for the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Config {
        Config {
            data_dir: data_dir.into(),
            exclude_failed: true,
        }
    }

    /// Keep participants who failed catch checks in the analysis table.
    pub fn keep_failed(mut self) -> Config {
        self.exclude_failed = false;
        self
    }
}
