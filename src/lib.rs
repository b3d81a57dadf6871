//! # tst-analysis
//!
//! Analysis pipeline for two-step task (TST) studies relating mental-health
//! questionnaire scores, demographics, and a model-based (MB) behavioral
//! score.
//!
//! The pipeline is a single-threaded batch over in-memory tables:
//!
//! 1. **Ingestion** ([`data`]): load a directory of CSV exports into named
//!    tables
//! 2. **Quality control** ([`quality`]): flag participants who failed
//!    catch/attention checks, per check and in union
//! 3. **Merge** ([`merge`]): inner-join demographic, questionnaire, and task
//!    tables into one participant-level analysis table with a fixed column
//!    order
//! 4. **Analysis** ([`analysis`]): quartile group assignment, per-group
//!    descriptive aggregation, and two-group inference (t-test, Pearson
//!    correlation, Cohen's d)
//! 5. **Output** ([`output`]): structured results rendered for the terminal
//!    or serialized to JSON for plotting and other downstream consumers
//!
//! ## Quick start
//!
//! ```ignore
//! use tst_analysis::{pipeline, Config};
//! use tst_analysis::analysis::{assign_extremes, indep_t_test};
//!
//! let report = pipeline::run(&Config::new("data/"))?;
//! let labeled = assign_extremes(&report.analysis, "lastWinRew_lastTranUnc")?;
//! let test = indep_t_test(&labeled, "lastWinRew_lastTranUnc", "anxiety_overall")?;
//! println!("{}", tst_analysis::output::format_t_test("anxiety_overall", &test));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod data;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod quality;
pub mod statistics;
pub mod types;

pub use analysis::{
    aggregate, assign_extremes, cohen_d, indep_t_test, pearson_correlation, AggregateRow,
    CorrelationResult, GroupLabel, StatOutcome, TTestResult,
};
pub use config::Config;
pub use data::{load_dir, DataError};
pub use merge::{merge, MergeError, ANALYSIS_COLUMNS};
pub use pipeline::{PipelineError, PipelineReport};
pub use quality::{find_failures, CatchCheck, FailureReport};
pub use types::{
    ParticipantId, SchemaError, SelectionError, Table, TableRole, TableSet, Value,
};
