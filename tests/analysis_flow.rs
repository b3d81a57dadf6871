//! Analysis-stage integration: quartile assignment feeding the t-test, and
//! trial-level aggregation, over synthetic participant tables.

use tst_analysis::analysis::{
    aggregate, assign_extremes, indep_t_test, pearson_correlation, StatOutcome,
};
use tst_analysis::{GroupLabel, Table, Value};

fn population(scores: &[(f64, f64)]) -> Table {
    let mut table = Table::new(
        "analysis",
        vec!["mb_score".to_string(), "anxiety_overall".to_string()],
    );
    for (mb, anxiety) in scores {
        table.push_row(vec![Value::Num(*mb), Value::Num(*anxiety)]);
    }
    table
}

#[test]
fn quartile_labels_partition_the_scored_population() {
    let table = population(&[
        (0.1, 12.0),
        (0.2, 14.0),
        (0.3, 11.0),
        (0.4, 16.0),
        (0.5, 13.0),
        (0.6, 15.0),
        (0.7, 18.0),
        (0.8, 17.0),
    ]);
    let labeled = assign_extremes(&table, "mb_score").unwrap();

    let labels: Vec<GroupLabel> = labeled
        .column("group_mb_score")
        .unwrap()
        .into_iter()
        .map(|v| GroupLabel::from_value(v).expect("every scored row is labeled"))
        .collect();

    let tops = labels.iter().filter(|&&l| l == GroupLabel::Top25).count();
    let bottoms = labels.iter().filter(|&&l| l == GroupLabel::Bottom25).count();
    let others = labels.iter().filter(|&&l| l == GroupLabel::Other).count();
    assert_eq!(tops + bottoms + others, 8);
    assert!(tops >= 2 && bottoms >= 2);
}

#[test]
fn extreme_groups_t_test_runs_off_the_assigned_labels() {
    // High-MB participants report clearly higher anxiety; the test should
    // find a positive effect.
    let table = population(&[
        (0.1, 10.0),
        (0.15, 11.0),
        (0.2, 10.5),
        (0.45, 14.0),
        (0.5, 13.5),
        (0.55, 14.5),
        (0.8, 20.0),
        (0.85, 21.0),
        (0.9, 20.5),
    ]);
    let labeled = assign_extremes(&table, "mb_score").unwrap();
    let outcome = indep_t_test(&labeled, "mb_score", "anxiety_overall").unwrap();

    let result = outcome.completed().expect("enough data for the test");
    assert_eq!(result.df, result.n_top + result.n_bottom - 2);
    assert!(result.t > 0.0);
    assert!(result.p < 0.05, "expected a clear separation, p = {}", result.p);
    assert!(result.cohen_d.unwrap() > 1.0);
}

#[test]
fn t_test_on_unlabeled_population_is_soft_insufficient() {
    // All scores identical: p25 == p75, so everything lands in Top_25 and
    // the Bottom_25 side is empty.
    let table = population(&[(0.5, 10.0), (0.5, 11.0), (0.5, 12.0)]);
    let labeled = assign_extremes(&table, "mb_score").unwrap();
    let outcome = indep_t_test(&labeled, "mb_score", "anxiety_overall").unwrap();
    assert!(matches!(outcome, StatOutcome::InsufficientData { .. }));
}

#[test]
fn correlation_on_the_same_population() {
    let table = population(&[
        (0.1, 10.0),
        (0.3, 12.0),
        (0.5, 13.0),
        (0.7, 17.0),
        (0.9, 19.0),
    ]);
    let outcome = pearson_correlation(&table, "mb_score", "anxiety_overall").unwrap();
    let result = outcome.completed().unwrap();
    assert!(result.r > 0.9);
    assert_eq!(result.n, 5);
    assert!(result.p < 0.05);
}

#[test]
fn trial_aggregation_counts_and_stay_probabilities() {
    let mut trials = Table::new(
        "MB_trials",
        vec!["condition".to_string(), "stay".to_string()],
    );
    for (condition, stay) in [
        ("lastWinRew_lastTranCom", 1.0),
        ("lastWinRew_lastTranCom", 1.0),
        ("lastWinRew_lastTranCom", 0.0),
        ("lastWinRew_lastTranUnc", 1.0),
        ("lastWinRew_lastTranUnc", 0.0),
        ("lastWinRew_lastTranUnc", 0.0),
    ] {
        trials.push_row(vec![Value::Str(condition.to_string()), Value::Num(stay)]);
    }

    let rows = aggregate(&trials, "condition", "stay").unwrap();
    assert_eq!(rows.len(), 2);

    let total: usize = rows.iter().map(|r| r.count).sum();
    assert_eq!(total, 6);

    assert!((rows[0].prob_stay - 2.0 / 3.0).abs() < 1e-10);
    assert!((rows[1].prob_stay - 1.0 / 3.0).abs() < 1e-10);
    for row in &rows {
        assert!(row.se > 0.0);
        assert!((0.0..=1.0).contains(&row.prob_stay));
    }
}
