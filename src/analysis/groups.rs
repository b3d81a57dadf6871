//! Extreme-score group assignment by quartile split.
//!
//! Participants are split on a chosen score column into the top and bottom
//! quartiles plus a middle "Other" group, the standard extreme-groups
//! contrast for trait comparisons. Assignment is a pure function returning a
//! new table so the source stays untouched and reusable.

use serde::Serialize;

use crate::statistics::percentile;
use crate::types::{SchemaError, Table, Value};

/// Group label of the quartile split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupLabel {
    /// Score at or above the 75th percentile.
    Top25,
    /// Score at or below the 25th percentile.
    Bottom25,
    /// Everything between the quartiles.
    Other,
}

impl GroupLabel {
    /// The label as stored in the table column.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupLabel::Top25 => "Top_25",
            GroupLabel::Bottom25 => "Bottom_25",
            GroupLabel::Other => "Other",
        }
    }

    /// Parse a table cell back into a label.
    pub fn from_value(value: &Value) -> Option<GroupLabel> {
        match value.as_str()? {
            "Top_25" => Some(GroupLabel::Top25),
            "Bottom_25" => Some(GroupLabel::Bottom25),
            "Other" => Some(GroupLabel::Other),
            _ => None,
        }
    }
}

/// Name of the label column derived for a score column.
pub fn group_column_name(score_col: &str) -> String {
    format!("group_{}", score_col)
}

/// Label each row by quartile of `score_col`, returning a new table with a
/// `group_<score_col>` column appended.
///
/// The 25th and 75th percentiles (linear interpolation) are computed over
/// the rows with a numeric score; rows with a missing score get no label at
/// all (a missing cell, not `Other`). The top condition is evaluated first,
/// so on degenerate data where p25 == p75 a tie at that value labels
/// `Top_25`. With no scored rows at all, every row is left unlabeled.
pub fn assign_extremes(table: &Table, score_col: &str) -> Result<Table, SchemaError> {
    let scores = table.numeric_column(score_col)?;

    let mut observed: Vec<f64> = scores.iter().flatten().copied().collect();
    let labels: Vec<Value> = if observed.is_empty() {
        vec![Value::Missing; scores.len()]
    } else {
        let p25 = percentile(&mut observed, 0.25);
        let p75 = percentile(&mut observed, 0.75);
        scores
            .iter()
            .map(|score| match score {
                Some(x) if *x >= p75 => Value::Str(GroupLabel::Top25.as_str().into()),
                Some(x) if *x <= p25 => Value::Str(GroupLabel::Bottom25.as_str().into()),
                Some(_) => Value::Str(GroupLabel::Other.as_str().into()),
                None => Value::Missing,
            })
            .collect()
    };

    Ok(table.with_column(group_column_name(score_col), labels))
}
