//! Merging demographic, questionnaire, and task tables into one
//! participant-level analysis table.
//!
//! The merge selects one table per role by name prefix, projects each down
//! to its contracted columns, inner-joins the three on `participant_id`, and
//! reorders the result into a fixed 19-column sequence. That column order is
//! a contract for downstream consumers (including plotting code that keys on
//! column position), so it is a literal constant here.

use std::collections::HashMap;
use std::fmt;

use crate::types::{
    ParticipantId, SchemaError, SelectionError, Table, TableRole, TableSet, Value,
};

/// Columns taken from the demographic table.
pub const DEMOGRAPHIC_COLUMNS: [&str; 7] = [
    "participant_id",
    "study",
    "age",
    "ethnicity",
    "mh_past",
    "mh_current",
    "fam_mh_past",
];

/// Columns taken from the questionnaire overall-scores table.
pub const OVERALL_SCORE_COLUMNS: [&str; 12] = [
    "participant_id",
    "ocir_overall",
    "alcohol_overall",
    "social_overall",
    "bis_overall",
    "neutral_overall",
    "depress_overall",
    "eat_overall",
    "schizo_overall",
    "iq_overall",
    "anxiety_overall",
    "apathy_overall",
];

/// Columns taken from the model-based task table.
pub const TASK_COLUMNS: [&str; 2] = ["participant_id", "lastWinRew_lastTranUnc"];

/// Fixed output column order of the analysis table.
pub const ANALYSIS_COLUMNS: [&str; 19] = [
    "study",
    "participant_id",
    "age",
    "lastWinRew_lastTranUnc",
    "ethnicity",
    "ocir_overall",
    "alcohol_overall",
    "social_overall",
    "bis_overall",
    "neutral_overall",
    "depress_overall",
    "eat_overall",
    "schizo_overall",
    "iq_overall",
    "anxiety_overall",
    "apathy_overall",
    "mh_past",
    "mh_current",
    "fam_mh_past",
];

/// Errors that can abort the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// A required table role could not be resolved by name prefix.
    Selection(SelectionError),
    /// A selected table lacks a contracted column.
    Schema(SchemaError),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::Selection(e) => write!(f, "{}", e),
            MergeError::Schema(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MergeError::Selection(e) => Some(e),
            MergeError::Schema(e) => Some(e),
        }
    }
}

impl From<SelectionError> for MergeError {
    fn from(e: SelectionError) -> Self {
        MergeError::Selection(e)
    }
}

impl From<SchemaError> for MergeError {
    fn from(e: SchemaError) -> Self {
        MergeError::Schema(e)
    }
}

/// Build the participant-level analysis table from the three table families.
///
/// Selects one table per role (`demographic_results*`, `mh_overall_scores*`,
/// `MB*`), projects each to its contracted columns, and inner-joins on
/// `participant_id`: participants absent from any source are dropped. An
/// empty intersection yields a valid, empty table.
pub fn merge(
    demographics: &TableSet,
    questionnaires: &TableSet,
    tasks: &TableSet,
) -> Result<Table, MergeError> {
    let demographic = demographics
        .select(TableRole::Demographic)?
        .project(&DEMOGRAPHIC_COLUMNS)?;
    let questionnaire = questionnaires
        .select(TableRole::OverallScores)?
        .project(&OVERALL_SCORE_COLUMNS)?;
    let task = tasks
        .select(TableRole::ModelBasedTask)?
        .project(&TASK_COLUMNS)?;

    let merged = inner_join(&demographic, &questionnaire)?;
    let merged = inner_join(&merged, &task)?;

    tracing::debug!(rows = merged.n_rows(), "merged analysis table");
    Ok(merged.project(&ANALYSIS_COLUMNS)?.renamed("analysis"))
}

/// Merge two tables that were already resolved and projected by the caller.
///
/// This is the explicit-roles entry point: `demographic`, `questionnaire`,
/// and `task` are single tables, not families, so prefix ambiguity is the
/// caller's problem.
pub fn merge_resolved(
    demographic: &Table,
    questionnaire: &Table,
    task: &Table,
) -> Result<Table, MergeError> {
    let demographic = demographic.project(&DEMOGRAPHIC_COLUMNS)?;
    let questionnaire = questionnaire.project(&OVERALL_SCORE_COLUMNS)?;
    let task = task.project(&TASK_COLUMNS)?;
    let merged = inner_join(&demographic, &questionnaire)?;
    let merged = inner_join(&merged, &task)?;
    Ok(merged.project(&ANALYSIS_COLUMNS)?.renamed("analysis"))
}

/// Inner join of two tables on `participant_id`.
///
/// Every matching left/right row pair yields an output row (duplicate keys
/// on either side multiply, as in a relational join). Rows with a missing
/// participant identifier never match. Output columns are the left table's
/// followed by the right table's minus its key column.
fn inner_join(left: &Table, right: &Table) -> Result<Table, SchemaError> {
    let left_key = left.require_column("participant_id")?;
    let right_key = right.require_column("participant_id")?;

    let mut right_rows: HashMap<ParticipantId, Vec<&[Value]>> = HashMap::new();
    for row in right.rows() {
        if let Some(pid) = row[right_key].participant_id() {
            right_rows.entry(pid).or_default().push(row);
        }
    }

    let mut columns: Vec<String> = left.columns().to_vec();
    for (idx, col) in right.columns().iter().enumerate() {
        if idx != right_key {
            columns.push(col.clone());
        }
    }

    let mut joined = Table::new(left.name(), columns);
    for row in left.rows() {
        let Some(pid) = row[left_key].participant_id() else {
            continue;
        };
        let Some(matches) = right_rows.get(&pid) else {
            continue;
        };
        for right_row in matches {
            let mut out: Vec<Value> = row.to_vec();
            for (idx, value) in right_row.iter().enumerate() {
                if idx != right_key {
                    out.push(value.clone());
                }
            }
            joined.push_row(out);
        }
    }
    Ok(joined)
}
