//! Per-group descriptive aggregation of trial-level data.
//!
//! For each distinct value of a grouping column this computes the count of
//! scored rows, mean, sample std, standard error, and the proportion of rows
//! whose score is exactly 1 (the stay probability of the two-step task,
//! where stay/switch is encoded 1/0).

use serde::Serialize;

use crate::statistics::{mean, sample_std, standard_error};
use crate::types::{SchemaError, Table, Value};

/// Descriptive statistics for one group of trial rows.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateRow {
    /// The distinct grouping value this row describes.
    pub group: Value,
    /// Number of rows with a numeric score.
    pub count: usize,
    /// Mean of the score column. NaN when no scored rows.
    pub mean: f64,
    /// Sample standard deviation (n−1). NaN when count < 2.
    pub std: f64,
    /// Standard error of the mean: std / sqrt(count). NaN when std is.
    pub se: f64,
    /// Fraction of rows whose score is exactly 1. Rows with any other score,
    /// including 0 and missing, count toward the denominator only.
    pub prob_stay: f64,
}

/// Aggregate a trial table by the distinct values of `group_col`.
///
/// Rows whose grouping value is missing are dropped. Output rows are sorted
/// ascending by group value: numeric ascending when numeric, lexicographic
/// for strings (numbers sort before strings on mixed columns).
pub fn aggregate(
    trials: &Table,
    group_col: &str,
    score_col: &str,
) -> Result<Vec<AggregateRow>, SchemaError> {
    let group_idx = trials.require_column(group_col)?;
    let score_idx = trials.require_column(score_col)?;

    // Distinct group values in sorted order, then one pass per group over the
    // collected per-group rows. Datasets are small, so a simple sorted Vec
    // keyed by sort_cmp stands in for an ordered map over Value.
    let mut groups: Vec<(Value, Vec<&Value>)> = Vec::new();
    for row in trials.rows() {
        let key = &row[group_idx];
        if key.is_missing() {
            continue;
        }
        match groups.iter_mut().find(|(g, _)| *g == *key) {
            Some((_, rows)) => rows.push(&row[score_idx]),
            None => groups.push((key.clone(), vec![&row[score_idx]])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| a.sort_cmp(b));

    Ok(groups
        .into_iter()
        .map(|(group, cells)| {
            let total = cells.len();
            let scores: Vec<f64> = cells.iter().filter_map(|v| v.as_num()).collect();
            let stays = scores.iter().filter(|&&x| x == 1.0).count();
            AggregateRow {
                group,
                count: scores.len(),
                mean: mean(&scores),
                std: sample_std(&scores),
                se: standard_error(&scores),
                prob_stay: stays as f64 / total as f64,
            }
        })
        .collect())
}
