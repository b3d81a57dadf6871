//! Inferential statistics between participant groups.
//!
//! Effect size (Cohen's d), Pearson correlation with a two-sided p-value,
//! and the equal-variance two-sample t-test between the `Top_25` and
//! `Bottom_25` extreme groups. p-values come from the Student's t CDF.
//!
//! Too few valid observations is a soft outcome, not an error: the result is
//! [`StatOutcome::InsufficientData`] and the caller moves on to its other
//! analyses.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::analysis::groups::{group_column_name, GroupLabel};
use crate::statistics::{mean, sample_variance};
use crate::types::{SchemaError, Table};

/// Result of a statistical computation that may be skipped for lack of data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StatOutcome<T> {
    /// The statistic was computed.
    Completed(T),
    /// Too few valid observations; the computation was skipped.
    InsufficientData {
        /// Minimum observations the computation needs.
        required: usize,
        /// Valid observations actually available.
        got: usize,
    },
}

impl<T> StatOutcome<T> {
    /// The completed result, if any.
    pub fn completed(&self) -> Option<&T> {
        match self {
            StatOutcome::Completed(r) => Some(r),
            StatOutcome::InsufficientData { .. } => None,
        }
    }
}

/// Pearson correlation between two columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    /// Pearson's r.
    pub r: f64,
    /// Two-sided p-value. NaN when undefined (n = 2 or degenerate variance).
    pub p: f64,
    /// Number of rows with both values present.
    pub n: usize,
}

/// Equal-variance two-sample t-test between the extreme groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TTestResult {
    /// t-statistic (Top_25 minus Bottom_25).
    pub t: f64,
    /// Degrees of freedom: n1 + n2 − 2.
    pub df: usize,
    /// Two-sided p-value.
    pub p: f64,
    /// Cohen's d for the two groups; `None` when either group has fewer
    /// than 2 observations.
    pub cohen_d: Option<f64>,
    /// Size of the Top_25 group.
    pub n_top: usize,
    /// Size of the Bottom_25 group.
    pub n_bottom: usize,
}

/// Cohen's d effect size between two samples.
///
/// `(mean(x) − mean(y)) / sqrt((var(x) + var(y)) / 2)` with n−1 variances.
/// Returns `None` when either sample has fewer than 2 observations, or when
/// both samples are constant with different means (no spread to scale by).
/// Two identical constant samples have zero effect by definition.
pub fn cohen_d(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 || y.len() < 2 {
        return None;
    }
    let diff = mean(x) - mean(y);
    let pooled = ((sample_variance(x) + sample_variance(y)) / 2.0).sqrt();
    if pooled == 0.0 {
        return (diff == 0.0).then_some(0.0);
    }
    Some(diff / pooled)
}

/// Pearson correlation between `x_col` and `y_col` of a table.
///
/// Rows missing either value are dropped. With fewer than 2 valid rows the
/// outcome is [`StatOutcome::InsufficientData`]; otherwise r and a two-sided
/// p-value from the t-transform `t = r·sqrt((n−2)/(1−r²))`.
pub fn pearson_correlation(
    table: &Table,
    x_col: &str,
    y_col: &str,
) -> Result<StatOutcome<CorrelationResult>, SchemaError> {
    let xs = table.numeric_column(x_col)?;
    let ys = table.numeric_column(y_col)?;

    let pairs: Vec<(f64, f64)> = xs
        .into_iter()
        .zip(ys)
        .filter_map(|(x, y)| Some((x?, y?)))
        .collect();
    let n = pairs.len();
    if n < 2 {
        return Ok(StatOutcome::InsufficientData { required: 2, got: n });
    }

    let mx = mean(&pairs.iter().map(|p| p.0).collect::<Vec<_>>());
    let my = mean(&pairs.iter().map(|p| p.1).collect::<Vec<_>>());
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in &pairs {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    // Zero variance in either column leaves r undefined; propagate NaN.
    let r = sxy / (sxx * syy).sqrt();

    let df = n as f64 - 2.0;
    let p = if r.is_nan() || df < 1.0 {
        f64::NAN
    } else if r.abs() >= 1.0 {
        0.0
    } else {
        two_sided_p(r * (df / (1.0 - r * r)).sqrt(), df)
    };

    Ok(StatOutcome::Completed(CorrelationResult { r, p, n }))
}

/// Equal-variance two-sample t-test of `score_col` between the `Top_25` and
/// `Bottom_25` groups of a quartile split.
///
/// Expects the `group_<group_score_col>` column produced by
/// [`crate::analysis::groups::assign_extremes`]. Rows with a missing score
/// or no group label are dropped; `Other` rows are excluded from the test
/// entirely. Degrees of freedom are n1 + n2 − 2.
pub fn indep_t_test(
    table: &Table,
    group_score_col: &str,
    score_col: &str,
) -> Result<StatOutcome<TTestResult>, SchemaError> {
    let label_col = group_column_name(group_score_col);
    let label_idx = table.require_column(&label_col)?;
    let score_idx = table.require_column(score_col)?;

    let mut top = Vec::new();
    let mut bottom = Vec::new();
    let mut valid = 0usize;
    for row in table.rows() {
        let Some(score) = row[score_idx].as_num() else {
            continue;
        };
        let Some(label) = GroupLabel::from_value(&row[label_idx]) else {
            continue;
        };
        valid += 1;
        match label {
            GroupLabel::Top25 => top.push(score),
            GroupLabel::Bottom25 => bottom.push(score),
            GroupLabel::Other => {}
        }
    }

    if valid < 2 {
        return Ok(StatOutcome::InsufficientData {
            required: 2,
            got: valid,
        });
    }
    if top.is_empty() || bottom.is_empty() {
        return Ok(StatOutcome::InsufficientData {
            required: 1,
            got: top.len().min(bottom.len()),
        });
    }

    let (n1, n2) = (top.len(), bottom.len());
    let df = n1 + n2 - 2;
    let diff = mean(&top) - mean(&bottom);

    // (n−1)·var terms, with the singleton case contributing zero spread
    // rather than 0·NaN.
    let ss = |sample: &[f64]| {
        if sample.len() > 1 {
            (sample.len() - 1) as f64 * sample_variance(sample)
        } else {
            0.0
        }
    };
    let pooled_var = (ss(&top) + ss(&bottom)) / df as f64;

    let t = if pooled_var == 0.0 && diff == 0.0 {
        0.0
    } else {
        diff / (pooled_var * (1.0 / n1 as f64 + 1.0 / n2 as f64)).sqrt()
    };
    let p = two_sided_p(t, df as f64);

    Ok(StatOutcome::Completed(TTestResult {
        t,
        df,
        p,
        cohen_d: cohen_d(&top, &bottom),
        n_top: n1,
        n_bottom: n2,
    }))
}

/// Two-sided p-value of a t-statistic against a Student's t distribution.
///
/// NaN inputs and df < 1 yield NaN; an infinite t yields 0.
fn two_sided_p(t: f64, df: f64) -> f64 {
    if t.is_nan() || df < 1.0 {
        return f64::NAN;
    }
    if t.is_infinite() {
        return 0.0;
    }
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        Err(_) => f64::NAN,
    }
}
