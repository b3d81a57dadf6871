//! Participant quality control: catch-trial and attention-check scanning.
//!
//! The study plants catch trials and attention checks across the
//! questionnaire and task exports. A participant fails a check if ANY of
//! their rows carries the exact value `"Fail"` in that check's column; one
//! bad trial among many good ones still flags the participant.
//!
//! Computation is pure and returns a [`FailureReport`]; human-readable
//! rendering lives in [`crate::output::terminal`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::types::{ParticipantId, Table, TableSet};

/// Name prefix of the questionnaire tables that carry catch columns.
const CALCULATED_SCORES_PREFIX: &str = "mh_calculated_scores";

/// The five named catch checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CatchCheck {
    /// Questionnaire catch question answered wrongly.
    Response,
    /// Questionnaire infrequency item answered implausibly.
    InfrequentResponse,
    /// Task-side catch trial: wrong side chosen.
    SideResponse,
    /// Too many missed task trials.
    MissedTrials,
    /// Implausible reaction times in the task.
    ReactionTime,
}

impl CatchCheck {
    /// All checks, questionnaire checks first.
    pub const ALL: [CatchCheck; 5] = [
        CatchCheck::Response,
        CatchCheck::InfrequentResponse,
        CatchCheck::SideResponse,
        CatchCheck::MissedTrials,
        CatchCheck::ReactionTime,
    ];

    /// The column name carrying this check's pass/fail flag.
    pub fn column(&self) -> &'static str {
        match self {
            CatchCheck::Response => "catch_response",
            CatchCheck::InfrequentResponse => "catch_infrequent_response",
            CatchCheck::SideResponse => "catch_side_response",
            CatchCheck::MissedTrials => "catch_missed_trials",
            CatchCheck::ReactionTime => "catch_RT",
        }
    }

    /// Whether this check lives in questionnaire tables (vs task tables).
    pub fn is_questionnaire_check(&self) -> bool {
        matches!(self, CatchCheck::Response | CatchCheck::InfrequentResponse)
    }
}

/// Per-check failure sets plus their union, computed once and immutable.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    by_check: BTreeMap<CatchCheck, BTreeSet<ParticipantId>>,
    any_failure: BTreeSet<ParticipantId>,
}

impl FailureReport {
    /// Participants who failed a specific check, sorted.
    pub fn check(&self, check: CatchCheck) -> &BTreeSet<ParticipantId> {
        &self.by_check[&check]
    }

    /// Union of all five failure sets.
    pub fn any_failure(&self) -> &BTreeSet<ParticipantId> {
        &self.any_failure
    }

    /// Whether a participant failed any check.
    pub fn failed(&self, id: &ParticipantId) -> bool {
        self.any_failure.contains(id)
    }
}

/// Scan questionnaire and task tables for catch-check failures.
///
/// Questionnaire checks apply only to tables whose name starts with
/// `mh_calculated_scores`; task checks apply to every task table. A table
/// lacking a check's column is silently skipped for that check. Failures
/// found across multiple tables accumulate into the same set.
pub fn find_failures(questionnaires: &TableSet, tasks: &TableSet) -> FailureReport {
    let mut by_check: BTreeMap<CatchCheck, BTreeSet<ParticipantId>> = CatchCheck::ALL
        .iter()
        .map(|&c| (c, BTreeSet::new()))
        .collect();

    for (name, table) in questionnaires.iter() {
        if !name.starts_with(CALCULATED_SCORES_PREFIX) {
            continue;
        }
        for check in CatchCheck::ALL.iter().filter(|c| c.is_questionnaire_check()) {
            scan_table(table, *check, by_check.get_mut(check).unwrap());
        }
    }

    for (_, table) in tasks.iter() {
        for check in CatchCheck::ALL.iter().filter(|c| !c.is_questionnaire_check()) {
            scan_table(table, *check, by_check.get_mut(check).unwrap());
        }
    }

    let any_failure = by_check.values().flatten().cloned().collect();
    FailureReport {
        by_check,
        any_failure,
    }
}

/// Add every participant with a `"Fail"` row in `check`'s column to `out`.
///
/// Tables without the check column are skipped; a table that carries the
/// check column but no `participant_id` column cannot be attributed and is
/// skipped with a warning (the QC contract has no error path).
fn scan_table(table: &Table, check: CatchCheck, out: &mut BTreeSet<ParticipantId>) {
    let Some(check_idx) = table.column_index(check.column()) else {
        return;
    };
    let Some(pid_idx) = table.column_index("participant_id") else {
        tracing::warn!(
            table = table.name(),
            column = check.column(),
            "table has a catch column but no participant_id; skipping"
        );
        return;
    };

    for row in table.rows() {
        if row[check_idx].as_str() == Some("Fail") {
            if let Some(pid) = row[pid_idx].participant_id() {
                out.insert(pid);
            }
        }
    }
}
