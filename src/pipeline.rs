//! End-to-end orchestration: load, quality-control, merge.
//!
//! The study exports everything into one directory; tables are routed to
//! the three families by name: `demographic*` → demographic, `mh_*` →
//! questionnaire, everything else → task. A single directory plus name
//! routing keeps the external interface to one path.

use std::fmt;

use serde::Serialize;

use crate::config::Config;
use crate::data::{self, DataError};
use crate::merge::{self, MergeError};
use crate::quality::{self, FailureReport};
use crate::types::{Table, TableSet};

/// Everything a pipeline run produces.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Per-check QC failure sets.
    pub failures: FailureReport,
    /// The merged participant-level analysis table, with failing
    /// participants removed unless configured otherwise.
    pub analysis: Table,
    /// Number of merged rows dropped for failed catch checks.
    pub excluded: usize,
}

/// Errors that abort a pipeline run.
#[derive(Debug)]
pub enum PipelineError {
    /// Loading the data directory failed.
    Data(DataError),
    /// The merge could not be performed.
    Merge(MergeError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Data(e) => write!(f, "{}", e),
            PipelineError::Merge(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Data(e) => Some(e),
            PipelineError::Merge(e) => Some(e),
        }
    }
}

impl From<DataError> for PipelineError {
    fn from(e: DataError) -> Self {
        PipelineError::Data(e)
    }
}

impl From<MergeError> for PipelineError {
    fn from(e: MergeError) -> Self {
        PipelineError::Merge(e)
    }
}

/// Split loaded tables into the demographic, questionnaire, and task
/// families by table name.
pub fn partition_tables(tables: &TableSet) -> (TableSet, TableSet, TableSet) {
    let mut demographics = TableSet::new();
    let mut questionnaires = TableSet::new();
    let mut tasks = TableSet::new();
    for (name, table) in tables.iter() {
        if name.starts_with("demographic") {
            demographics.insert(table.clone());
        } else if name.starts_with("mh_") {
            questionnaires.insert(table.clone());
        } else {
            tasks.insert(table.clone());
        }
    }
    (demographics, questionnaires, tasks)
}

/// Run the full pipeline on a data directory.
///
/// Loads every CSV, scans for catch-check failures, merges the three table
/// families into the analysis table, and (by default) drops rows whose
/// participant failed any check.
pub fn run(config: &Config) -> Result<PipelineReport, PipelineError> {
    let tables = data::load_dir(&config.data_dir)?;
    tracing::info!(tables = tables.len(), dir = %config.data_dir.display(), "loaded data");

    let (demographics, questionnaires, tasks) = partition_tables(&tables);
    let failures = quality::find_failures(&questionnaires, &tasks);
    let merged = merge::merge(&demographics, &questionnaires, &tasks)?;

    let (analysis, excluded) = if config.exclude_failed {
        let pid_idx = merged
            .require_column("participant_id")
            .map_err(MergeError::from)?;
        let before = merged.n_rows();
        let kept = merged.filter_rows(|row| {
            row[pid_idx]
                .participant_id()
                .map(|pid| !failures.failed(&pid))
                .unwrap_or(true)
        });
        let excluded = before - kept.n_rows();
        (kept, excluded)
    } else {
        (merged, 0)
    };

    if excluded > 0 {
        tracing::info!(excluded, "dropped participants who failed catch checks");
    }

    Ok(PipelineReport {
        failures,
        analysis,
        excluded,
    })
}
