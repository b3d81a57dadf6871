//! Sample mean, variance, and standard error.
//!
//! All estimators use the n−1 (sample) denominator. Degenerate inputs
//! propagate as NaN rather than panicking: the mean of an empty sample and
//! the variance of a singleton are both NaN, matching how the rest of the
//! pipeline treats undefined statistics.

/// Arithmetic mean of a sample. NaN for an empty sample.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample variance with n−1 denominator. NaN when fewer than 2 observations.
pub fn sample_variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return f64::NAN;
    }
    let m = mean(data);
    let sum_sq: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    sum_sq / (data.len() - 1) as f64
}

/// Sample standard deviation (n−1). NaN when fewer than 2 observations.
pub fn sample_std(data: &[f64]) -> f64 {
    sample_variance(data).sqrt()
}

/// Standard error of the mean: std / sqrt(n). NaN when std is undefined.
pub fn standard_error(data: &[f64]) -> f64 {
    sample_std(data) / (data.len() as f64).sqrt()
}
