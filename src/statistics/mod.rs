//! Descriptive statistical primitives.
//!
//! Small, allocation-light building blocks shared by the aggregation and
//! inference code:
//! - Sample mean, variance, and standard deviation (n−1 denominator)
//! - Standard error of the mean
//! - Linear-interpolation percentiles

mod descriptive;
mod quantile;

pub use descriptive::{mean, sample_std, sample_variance, standard_error};
pub use quantile::percentile;
