//! Percentiles via linear interpolation.
//!
//! For a sorted sample x of size n at probability p, the rank is
//! `h = (n - 1) * p` and the percentile interpolates linearly between the
//! surrounding order statistics:
//!
//! ```text
//! q = x[floor(h)] + (h - floor(h)) * (x[ceil(h)] - x[floor(h)])
//! ```
//!
//! This is the "linear" (Type 7) estimator, the default used by the study's
//! quartile splits. Not an inference-grade estimator; for this pipeline the
//! percentiles only place cut points in a population of scores.

/// Compute a percentile of a sample using linear interpolation.
///
/// The slice is sorted in place as a side effect.
///
/// # Arguments
///
/// * `data` - Mutable slice of observations (will be sorted)
/// * `p` - Probability in [0, 1]
///
/// # Panics
///
/// Panics if `data` is empty or if `p` is outside [0, 1].
pub fn percentile(data: &mut [f64], p: f64) -> f64 {
    assert!(!data.is_empty(), "cannot compute percentile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "percentile probability must be in [0, 1]"
    );

    data.sort_unstable_by(|a, b| a.total_cmp(b));

    let n = data.len();
    if n == 1 {
        return data[0];
    }

    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        return data[lo];
    }
    data[lo] + (h - lo as f64) * (data[hi] - data[lo])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_sample() {
        let mut data = vec![5.0, 1.0, 3.0, 2.0, 4.0];
        assert!((percentile(&mut data, 0.5) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn median_of_even_sample_interpolates() {
        let mut data = vec![1.0, 2.0, 3.0, 4.0];
        // h = 3 * 0.5 = 1.5 -> between 2.0 and 3.0
        assert!((percentile(&mut data, 0.5) - 2.5).abs() < 1e-10);
    }

    #[test]
    fn quartiles_of_known_sample() {
        // numpy: percentile([1..5], 25) = 2.0, percentile([1..5], 75) = 4.0
        let mut data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((percentile(&mut data, 0.25) - 2.0).abs() < 1e-10);
        assert!((percentile(&mut data, 0.75) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn interpolated_quartile() {
        // numpy: percentile([1, 2, 3, 4], 25) = 1.75
        let mut data = vec![1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&mut data, 0.25) - 1.75).abs() < 1e-10);
    }

    #[test]
    fn extremes_are_min_and_max() {
        let mut data = vec![9.0, 1.0, 5.0];
        assert!((percentile(&mut data, 0.0) - 1.0).abs() < 1e-10);
        let mut data = vec![9.0, 1.0, 5.0];
        assert!((percentile(&mut data, 1.0) - 9.0).abs() < 1e-10);
    }

    #[test]
    fn singleton_is_its_own_percentile() {
        let mut data = vec![4.2];
        assert!((percentile(&mut data, 0.25) - 4.2).abs() < 1e-10);
        assert!((percentile(&mut data, 0.75) - 4.2).abs() < 1e-10);
    }
}
