//! Terminal rendering of analysis results, with colors.
//!
//! Formatting follows the study's reporting conventions: correlation r to 2
//! decimal places, t and Cohen's d to 3 decimal places, p-values to 3
//! significant digits.

use colored::Colorize;

use crate::analysis::{AggregateRow, CorrelationResult, StatOutcome, TTestResult};
use crate::quality::{CatchCheck, FailureReport};

/// Format the QC failure report, one line per check.
///
/// Failing checks list the sorted participant identifiers; clean checks get
/// a green no-failures notice. The `any_failure` union is reported last.
pub fn format_failure_report(report: &FailureReport) -> String {
    let mut out = String::new();
    for check in CatchCheck::ALL {
        let failed = report.check(check);
        if failed.is_empty() {
            out.push_str(&format!(
                "{}\n",
                format!("No participants failed {}", check.column()).green()
            ));
        } else {
            let ids: Vec<String> = failed.iter().map(|id| id.to_string()).collect();
            out.push_str(&format!(
                "Participants who failed {}: [{}]\n",
                check.column().yellow(),
                ids.join(", ")
            ));
        }
    }
    let union = report.any_failure();
    if union.is_empty() {
        out.push_str(&format!("{}\n", "No participants failed any check".green()));
    } else {
        let ids: Vec<String> = union.iter().map(|id| id.to_string()).collect();
        out.push_str(&format!(
            "Participants who failed {}: [{}]\n",
            "any_failure".red().bold(),
            ids.join(", ")
        ));
    }
    out
}

/// Format a correlation outcome between two named columns.
pub fn format_correlation(
    x_col: &str,
    y_col: &str,
    outcome: &StatOutcome<CorrelationResult>,
) -> String {
    match outcome {
        StatOutcome::Completed(result) => format!(
            "Correlation {} ~ {}: r = {:.2}, p = {}, n = {}",
            x_col.cyan(),
            y_col.cyan(),
            result.r,
            format_sig(result.p, 3),
            result.n
        ),
        StatOutcome::InsufficientData { required, got } => format!(
            "Correlation {} ~ {}: {} ({} valid rows, need {})",
            x_col.cyan(),
            y_col.cyan(),
            "insufficient data".yellow(),
            got,
            required
        ),
    }
}

/// Format a two-sample t-test outcome for a score column.
pub fn format_t_test(score_col: &str, outcome: &StatOutcome<TTestResult>) -> String {
    match outcome {
        StatOutcome::Completed(result) => {
            let d = match result.cohen_d {
                Some(d) => format!("{:.3}", d),
                None => "undefined".to_string(),
            };
            format!(
                "t-test on {} (Top_25 vs Bottom_25): t({}) = {:.3}, p = {}, d = {}, n = {}/{}",
                score_col.cyan(),
                result.df,
                result.t,
                format_sig(result.p, 3),
                d,
                result.n_top,
                result.n_bottom
            )
        }
        StatOutcome::InsufficientData { required, got } => format!(
            "t-test on {}: {} ({} valid observations, need {})",
            score_col.cyan(),
            "insufficient data".yellow(),
            got,
            required
        ),
    }
}

/// Format aggregate rows as an aligned text table.
pub fn format_aggregate_rows(group_col: &str, rows: &[AggregateRow]) -> String {
    let mut out = format!(
        "{:<16} {:>7} {:>9} {:>9} {:>9} {:>10}\n",
        group_col.bold(),
        "count",
        "mean",
        "std",
        "se",
        "prob_stay"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<16} {:>7} {:>9.3} {:>9.3} {:>9.3} {:>10.3}\n",
            row.group.to_string(),
            row.count,
            row.mean,
            row.std,
            row.se,
            row.prob_stay
        ));
    }
    out
}

/// Format a number to a given count of significant digits.
///
/// NaN renders as `NaN`; zero as `0`. Used for p-values.
fn format_sig(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let exponent = value.abs().log10().floor() as i32;
    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    format!("{:.*}", decimals, value)
}
