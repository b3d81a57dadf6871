//! CLI for the two-step task analysis pipeline.
//!
//! # Usage
//!
//! ```bash
//! # Load, QC, and merge a data directory; print the QC report
//! tst-analyze data/
//!
//! # Keep participants who failed catch checks
//! tst-analyze data/ --keep-failed
//!
//! # Quartile split on the MB score and t-test a questionnaire score
//! tst-analyze data/ --group-on lastWinRew_lastTranUnc --test anxiety_overall
//!
//! # Correlate two analysis-table columns
//! tst-analyze data/ --correlate lastWinRew_lastTranUnc,ocir_overall
//!
//! # Machine-readable output for the plotting side
//! tst-analyze data/ --json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tst_analysis::analysis::{assign_extremes, indep_t_test, pearson_correlation};
use tst_analysis::output;
use tst_analysis::{pipeline, Config};

/// Two-step task study analysis: QC, merge, and group statistics
#[derive(Parser, Debug)]
#[command(name = "tst-analyze")]
#[command(about = "Quality-control, merge, and analyze two-step task study exports")]
#[command(version)]
struct Args {
    /// Directory of CSV exports (one table per file)
    data_dir: PathBuf,

    /// Keep participants who failed catch checks in the analysis table
    #[arg(long)]
    keep_failed: bool,

    /// Emit the pipeline report as pretty-printed JSON instead of text
    #[arg(long)]
    json: bool,

    /// Score column for the quartile split (enables --test)
    #[arg(long, value_name = "COLUMN")]
    group_on: Option<String>,

    /// Score column to t-test between the Top_25 and Bottom_25 groups
    #[arg(long, value_name = "COLUMN", requires = "group_on")]
    test: Vec<String>,

    /// Pair of columns to correlate, as "x_col,y_col" (repeatable)
    #[arg(long, value_name = "X,Y")]
    correlate: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::new(&args.data_dir);
    if args.keep_failed {
        config = config.keep_failed();
    }

    let report = pipeline::run(&config)?;

    if args.json {
        println!("{}", output::to_json_pretty(&report)?);
        return Ok(());
    }

    print!("{}", output::format_failure_report(&report.failures));
    println!(
        "Analysis table: {} participants ({} excluded for failed checks)",
        report.analysis.n_rows(),
        report.excluded
    );

    for pair in &args.correlate {
        let Some((x_col, y_col)) = pair.split_once(',') else {
            return Err(format!("--correlate expects 'x_col,y_col', got '{}'", pair).into());
        };
        let outcome = pearson_correlation(&report.analysis, x_col.trim(), y_col.trim())?;
        println!(
            "{}",
            output::format_correlation(x_col.trim(), y_col.trim(), &outcome)
        );
    }

    if let Some(group_on) = &args.group_on {
        let labeled = assign_extremes(&report.analysis, group_on)?;
        for score_col in &args.test {
            let outcome = indep_t_test(&labeled, group_on, score_col)?;
            println!("{}", output::format_t_test(score_col, &outcome));
        }
    }

    Ok(())
}
