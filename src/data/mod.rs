//! Data loading: a directory of CSV exports becomes a set of named tables.
//!
//! One logical table per file; the table name is the file name without its
//! extension. Loading is a one-shot bulk read at pipeline start; there is no
//! streaming or incremental ingestion.

mod csv;

pub use csv::{parse_csv, parse_csv_reader};

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::types::TableSet;

/// Errors that can occur while loading tabular files.
#[derive(Debug)]
pub enum DataError {
    /// IO error reading a directory or file.
    Io(std::io::Error),

    /// CSV parse error at a specific line of a specific file.
    Parse {
        /// File where the error occurred.
        path: PathBuf,
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Description of the parse error.
        message: String,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "IO error: {}", e),
            DataError::Parse {
                path,
                line,
                message,
            } => write!(
                f,
                "parse error in {} at line {}: {}",
                path.display(),
                line,
                message
            ),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}

/// Load every `*.csv` file in a directory into a [`TableSet`].
///
/// Table names are file stems; files are visited in sorted path order.
/// Non-CSV files are skipped. An empty or CSV-free directory yields an empty
/// set; a missing directory is an [`DataError::Io`] error.
pub fn load_dir(dir: &Path) -> Result<TableSet, DataError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    let mut tables = TableSet::new();
    for path in paths {
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if !is_csv {
            tracing::debug!(path = %path.display(), "skipping non-CSV file");
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let reader = BufReader::new(File::open(&path)?);
        let table = parse_csv_reader(reader, &name, &path)?;
        tracing::debug!(table = %name, rows = table.n_rows(), "loaded table");
        tables.insert(table);
    }
    Ok(tables)
}
