//! Presentation of analysis results.
//!
//! Computation in this crate returns structured result objects; everything
//! human- or machine-readable happens here. [`terminal`] renders colored
//! text reports, [`json`] serializes results for external consumers (the
//! plotting collaborator reads the JSON tables).

pub mod json;
pub mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{
    format_aggregate_rows, format_correlation, format_failure_report, format_t_test,
};
