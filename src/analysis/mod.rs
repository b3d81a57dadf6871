//! Group-level analysis of the merged participant table.
//!
//! Three pieces, applied in order on the analysis table:
//!
//! 1. **Aggregation** ([`aggregate`]): per-group descriptive statistics over
//!    trial-level data (count, mean, std, se, stay probability)
//! 2. **Group assignment** ([`groups`]): quartile split into extreme-score
//!    subgroups (`Top_25` / `Bottom_25` / `Other`)
//! 3. **Inference** ([`stats`]): Cohen's d, Pearson correlation, and the
//!    equal-variance two-sample t-test between extreme groups

pub mod aggregate;
pub mod groups;
pub mod stats;

pub use aggregate::{aggregate, AggregateRow};
pub use groups::{assign_extremes, group_column_name, GroupLabel};
pub use stats::{
    cohen_d, indep_t_test, pearson_correlation, CorrelationResult, StatOutcome, TTestResult,
};
