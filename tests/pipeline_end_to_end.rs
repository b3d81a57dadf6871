//! End-to-end pipeline tests over a temporary data directory:
//! CSV loading, catch-check scanning, merge, and QC-based exclusion.

use std::fs;
use std::path::Path;

use tst_analysis::{pipeline, CatchCheck, Config, ParticipantId, ANALYSIS_COLUMNS};

fn write_csv(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// A minimal but complete study export: three mergeable tables plus task
/// tables carrying catch checks.
fn seed_study(dir: &Path) {
    write_csv(
        dir,
        "demographic_results_2024.csv",
        "participant_id,study,age,ethnicity,mh_past,mh_current,fam_mh_past\n\
         1,A,25,X,0,0,0\n\
         7,A,31,Y,0,1,0\n\
         9,A,28,X,1,0,1\n",
    );
    write_csv(
        dir,
        "mh_overall_scores.csv",
        "participant_id,ocir_overall,alcohol_overall,social_overall,bis_overall,\
         neutral_overall,depress_overall,eat_overall,schizo_overall,iq_overall,\
         anxiety_overall,apathy_overall\n\
         1,0.5,0.5,0.5,0.5,0.5,0.5,0.5,0.5,0.5,0.5,0.5\n\
         7,0.1,0.2,0.3,0.4,0.5,0.6,0.7,0.8,0.9,1.0,1.1\n\
         9,0.9,0.8,0.7,0.6,0.5,0.4,0.3,0.2,0.1,0.0,0.1\n",
    );
    write_csv(
        dir,
        "MB_scores.csv",
        "participant_id,lastWinRew_lastTranUnc\n1,0.7\n7,0.4\n9,0.6\n",
    );
    // Participant 7 fails catch_RT on one of three trials.
    write_csv(
        dir,
        "task_trials_a.csv",
        "participant_id,catch_RT\n7,Pass\n7,Fail\n7,Pass\n1,Pass\n",
    );
    // Participant 9 fails catch_side_response in a second task table.
    write_csv(
        dir,
        "task_trials_b.csv",
        "participant_id,catch_side_response\n9,Fail\n1,Pass\n",
    );
}

#[test]
fn failure_sets_match_the_worked_scenario() {
    let dir = tempfile::tempdir().unwrap();
    seed_study(dir.path());

    let report = pipeline::run(&Config::new(dir.path()).keep_failed()).unwrap();

    let rt: Vec<_> = report
        .failures
        .check(CatchCheck::ReactionTime)
        .iter()
        .collect();
    assert_eq!(rt, vec![&ParticipantId::Int(7)]);

    let side: Vec<_> = report
        .failures
        .check(CatchCheck::SideResponse)
        .iter()
        .collect();
    assert_eq!(side, vec![&ParticipantId::Int(9)]);

    let any: Vec<_> = report.failures.any_failure().iter().collect();
    assert_eq!(any, vec![&ParticipantId::Int(7), &ParticipantId::Int(9)]);
}

#[test]
fn merge_produces_the_contracted_row_for_participant_one() {
    let dir = tempfile::tempdir().unwrap();
    seed_study(dir.path());

    let report = pipeline::run(&Config::new(dir.path())).unwrap();
    let analysis = &report.analysis;

    let columns: Vec<&str> = analysis.columns().iter().map(|c| c.as_str()).collect();
    assert_eq!(columns, ANALYSIS_COLUMNS.to_vec());

    // Participants 7 and 9 failed checks and are excluded by default.
    assert_eq!(analysis.n_rows(), 1);
    assert_eq!(report.excluded, 2);

    use tst_analysis::Value;
    assert_eq!(analysis.value(0, "study"), Some(&Value::Str("A".into())));
    assert_eq!(analysis.value(0, "participant_id"), Some(&Value::Num(1.0)));
    assert_eq!(analysis.value(0, "age"), Some(&Value::Num(25.0)));
    assert_eq!(
        analysis.value(0, "lastWinRew_lastTranUnc"),
        Some(&Value::Num(0.7))
    );
    assert_eq!(analysis.value(0, "ethnicity"), Some(&Value::Str("X".into())));
    assert_eq!(analysis.value(0, "ocir_overall"), Some(&Value::Num(0.5)));
    assert_eq!(analysis.value(0, "apathy_overall"), Some(&Value::Num(0.5)));
    assert_eq!(analysis.value(0, "fam_mh_past"), Some(&Value::Num(0.0)));
}

#[test]
fn keep_failed_retains_all_merged_participants() {
    let dir = tempfile::tempdir().unwrap();
    seed_study(dir.path());

    let report = pipeline::run(&Config::new(dir.path()).keep_failed()).unwrap();
    assert_eq!(report.analysis.n_rows(), 3);
    assert_eq!(report.excluded, 0);
}

#[test]
fn missing_required_table_aborts_the_merge() {
    let dir = tempfile::tempdir().unwrap();
    seed_study(dir.path());
    fs::remove_file(dir.path().join("MB_scores.csv")).unwrap();

    let err = pipeline::run(&Config::new(dir.path())).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("MB"), "unexpected message: {}", message);
}

#[test]
fn calculated_scores_catch_columns_flag_questionnaire_failures() {
    let dir = tempfile::tempdir().unwrap();
    seed_study(dir.path());
    write_csv(
        dir.path(),
        "mh_calculated_scores_wave1.csv",
        "participant_id,catch_response,catch_infrequent_response\n\
         1,Pass,Pass\n\
         7,Fail,Pass\n\
         9,Pass,Fail\n",
    );

    let report = pipeline::run(&Config::new(dir.path()).keep_failed()).unwrap();
    assert!(report
        .failures
        .check(CatchCheck::Response)
        .contains(&ParticipantId::Int(7)));
    assert!(report
        .failures
        .check(CatchCheck::InfrequentResponse)
        .contains(&ParticipantId::Int(9)));
}
