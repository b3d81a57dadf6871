//! Core data model: cell values, tables, participant identifiers.
//!
//! Every loaded CSV becomes a [`Table`]: named, ordered columns over row-major
//! records of loosely-typed [`Value`] cells. Columns are typed implicitly by
//! their values, matching the semantics of the study's CSV exports where a
//! column may hold numbers, strings, or gaps.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A single cell value in a table.
///
/// Numeric cells always hold finite floats; non-finite parses (`NaN`, `inf`)
/// collapse into [`Value::Missing`] so that missingness has exactly one
/// representation throughout the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A finite numeric value.
    Num(f64),
    /// A free-form string value.
    Str(String),
    /// An absent cell (empty, `NA`, `NaN`).
    Missing,
}

impl Value {
    /// Parse a raw CSV cell into a typed value.
    ///
    /// Empty cells and the common missing-data markers (`NA`, `N/A`, `NaN`,
    /// `null`) become [`Value::Missing`]. Anything that parses as a finite
    /// float becomes [`Value::Num`]; the rest stays [`Value::Str`].
    pub fn parse(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Missing;
        }
        match trimmed {
            "NA" | "N/A" | "NaN" | "nan" | "null" | "NULL" => return Value::Missing,
            _ => {}
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Num(n),
            Ok(_) => Value::Missing,
            Err(_) => Value::Str(trimmed.to_string()),
        }
    }

    /// Numeric view of the cell, if it holds a number.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// String view of the cell, if it holds text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the cell is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Interpret the cell as a participant identifier.
    ///
    /// Integral numbers become [`ParticipantId::Int`]; text becomes
    /// [`ParticipantId::Text`]; missing cells have no identifier.
    pub fn participant_id(&self) -> Option<ParticipantId> {
        match self {
            Value::Num(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                Some(ParticipantId::Int(*n as i64))
            }
            Value::Num(n) => Some(ParticipantId::Text(format_num(*n))),
            Value::Str(s) => Some(ParticipantId::Text(s.clone())),
            Value::Missing => None,
        }
    }

    /// Total order used when sorting distinct values: numbers ascending,
    /// then strings lexicographically, then missing.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => a.total_cmp(b),
            (Value::Num(_), _) => Ordering::Less,
            (_, Value::Num(_)) => Ordering::Greater,
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Str(_), Value::Missing) => Ordering::Less,
            (Value::Missing, Value::Str(_)) => Ordering::Greater,
            (Value::Missing, Value::Missing) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{}", format_num(*n)),
            Value::Str(s) => write!(f, "{}", s),
            Value::Missing => write!(f, "NaN"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Num(n) => serializer.serialize_f64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Missing => serializer.serialize_none(),
        }
    }
}

/// Render a float without a trailing `.0` for integral values.
fn format_num(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A scalar participant identifier, unique per participant across the
/// demographic and questionnaire tables (task tables repeat it per trial).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParticipantId {
    /// Numeric identifier.
    Int(i64),
    /// Textual identifier.
    Text(String),
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantId::Int(n) => write!(f, "{}", n),
            ParticipantId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for ParticipantId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParticipantId::Int(n) => serializer.serialize_i64(*n),
            ParticipantId::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// A selected table lacks a column the operation requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Name of the table missing the column.
    pub table: String,
    /// Name of the missing column.
    pub column: String,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "table '{}' is missing expected column '{}'",
            self.table, self.column
        )
    }
}

impl std::error::Error for SchemaError {}

/// The role a table plays in the merge, resolved by name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    /// Demographic results (`demographic_results*`).
    Demographic,
    /// Questionnaire overall scores (`mh_overall_scores*`).
    OverallScores,
    /// Model-based task summary (`MB*`).
    ModelBasedTask,
}

impl TableRole {
    /// Name prefix that identifies tables with this role.
    pub fn prefix(&self) -> &'static str {
        match self {
            TableRole::Demographic => "demographic_results",
            TableRole::OverallScores => "mh_overall_scores",
            TableRole::ModelBasedTask => "MB",
        }
    }

    /// Human-readable role name for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TableRole::Demographic => "demographic",
            TableRole::OverallScores => "questionnaire overall-scores",
            TableRole::ModelBasedTask => "model-based task",
        }
    }
}

/// No loaded table matches a required name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionError {
    /// The role that could not be resolved.
    pub role: TableRole,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no {} table found (expected a table whose name starts with '{}')",
            self.role.describe(),
            self.role.prefix()
        )
    }
}

impl std::error::Error for SelectionError {}

/// A named table: ordered columns over row-major records.
///
/// Invariant: every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given name and column names.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Table {
        Table {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Table name (file stem for loaded tables).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row.
    ///
    /// # Panics
    ///
    /// Panics if the row length does not match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row length must match column count in table '{}'",
            self.name
        );
        self.rows.push(row);
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Whether the table has a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of a column, or a [`SchemaError`] naming table and column.
    pub fn require_column(&self, name: &str) -> Result<usize, SchemaError> {
        self.column_index(name).ok_or_else(|| SchemaError {
            table: self.name.clone(),
            column: name.to_string(),
        })
    }

    /// Cell at `(row, column name)`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// All values of a column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>, SchemaError> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Numeric view of a column: `Some(f64)` per numeric cell, `None` for
    /// missing or textual cells.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, SchemaError> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(|r| r[idx].as_num()).collect())
    }

    /// Project the table down to the given columns, in the given order.
    ///
    /// Fails with [`SchemaError`] naming the first absent column.
    pub fn project(&self, columns: &[&str]) -> Result<Table, SchemaError> {
        let indices: Vec<usize> = columns
            .iter()
            .map(|c| self.require_column(c))
            .collect::<Result<_, _>>()?;
        let rows = self
            .rows
            .iter()
            .map(|r| indices.iter().map(|&i| r[i].clone()).collect())
            .collect();
        Ok(Table {
            name: self.name.clone(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// Return a copy of the table with one extra column appended.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have one entry per row.
    pub fn with_column(&self, name: impl Into<String>, values: Vec<Value>) -> Table {
        assert_eq!(
            values.len(),
            self.rows.len(),
            "appended column must have one value per row"
        );
        let mut table = self.clone();
        table.columns.push(name.into());
        for (row, value) in table.rows.iter_mut().zip(values) {
            row.push(value);
        }
        table
    }

    /// Return a copy of the table keeping only rows that satisfy `keep`.
    pub fn filter_rows(&self, mut keep: impl FnMut(&[Value]) -> bool) -> Table {
        Table {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| keep(r.as_slice()))
                .cloned()
                .collect(),
        }
    }

    /// Rename the table.
    pub fn renamed(mut self, name: impl Into<String>) -> Table {
        self.name = name.into();
        self
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Rows<'a>(&'a [Vec<Value>]);
        impl Serialize for Rows<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
                for row in self.0 {
                    seq.serialize_element(row)?;
                }
                seq.end()
            }
        }

        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("columns", &self.columns)?;
        map.serialize_entry("rows", &Rows(&self.rows))?;
        map.end()
    }
}

/// A set of loaded tables, keyed by name in sorted order.
///
/// Sorted iteration is what makes "first match by prefix" deterministic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableSet {
    tables: BTreeMap<String, Table>,
}

impl TableSet {
    /// Create an empty set.
    pub fn new() -> TableSet {
        TableSet::default()
    }

    /// Build a set from tables, keyed by their names.
    pub fn from_tables(tables: impl IntoIterator<Item = Table>) -> TableSet {
        let mut set = TableSet::new();
        for table in tables {
            set.insert(table);
        }
        set
    }

    /// Insert a table under its own name, replacing any previous entry.
    pub fn insert(&mut self, table: Table) {
        self.tables.insert(table.name().to_string(), table);
    }

    /// Look up a table by exact name.
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the set holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate over `(name, table)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve the single table for a role by name prefix.
    ///
    /// Returns the first match in sorted name order. Multiple matches are
    /// unspecified by the data contract; the ambiguity is logged and the
    /// first match is used.
    pub fn select(&self, role: TableRole) -> Result<&Table, SelectionError> {
        let mut matches = self
            .tables
            .values()
            .filter(|t| t.name().starts_with(role.prefix()));
        let first = matches.next().ok_or(SelectionError { role })?;
        if let Some(second) = matches.next() {
            tracing::warn!(
                role = role.describe(),
                first = first.name(),
                also = second.name(),
                "multiple tables match prefix '{}'; using the first in sorted order",
                role.prefix()
            );
        }
        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_and_text_cells() {
        assert_eq!(Value::parse("3.5"), Value::Num(3.5));
        assert_eq!(Value::parse(" 42 "), Value::Num(42.0));
        assert_eq!(Value::parse("Fail"), Value::Str("Fail".to_string()));
        assert_eq!(Value::parse(""), Value::Missing);
        assert_eq!(Value::parse("NA"), Value::Missing);
        assert_eq!(Value::parse("NaN"), Value::Missing);
    }

    #[test]
    fn participant_id_from_integral_num() {
        assert_eq!(
            Value::Num(7.0).participant_id(),
            Some(ParticipantId::Int(7))
        );
        assert_eq!(
            Value::Str("sub-01".into()).participant_id(),
            Some(ParticipantId::Text("sub-01".into()))
        );
        assert_eq!(Value::Missing.participant_id(), None);
    }

    #[test]
    fn sort_order_numbers_before_strings() {
        let mut values = vec![
            Value::Str("b".into()),
            Value::Num(2.0),
            Value::Missing,
            Value::Num(-1.0),
            Value::Str("a".into()),
        ];
        values.sort_by(|a, b| a.sort_cmp(b));
        assert_eq!(
            values,
            vec![
                Value::Num(-1.0),
                Value::Num(2.0),
                Value::Str("a".into()),
                Value::Str("b".into()),
                Value::Missing,
            ]
        );
    }

    #[test]
    fn project_preserves_order_and_reports_missing() {
        let mut table = Table::new("t", vec!["a".into(), "b".into(), "c".into()]);
        table.push_row(vec![Value::Num(1.0), Value::Num(2.0), Value::Num(3.0)]);

        let projected = table.project(&["c", "a"]).unwrap();
        assert_eq!(projected.columns(), &["c".to_string(), "a".to_string()]);
        assert_eq!(projected.value(0, "c"), Some(&Value::Num(3.0)));

        let err = table.project(&["a", "zzz"]).unwrap_err();
        assert_eq!(err.table, "t");
        assert_eq!(err.column, "zzz");
    }

    #[test]
    fn select_by_prefix_takes_first_sorted_match() {
        let set = TableSet::from_tables(vec![
            Table::new("demographic_results_b", vec![]),
            Table::new("demographic_results_a", vec![]),
            Table::new("unrelated", vec![]),
        ]);
        let table = set.select(TableRole::Demographic).unwrap();
        assert_eq!(table.name(), "demographic_results_a");

        let err = set.select(TableRole::ModelBasedTask).unwrap_err();
        assert_eq!(err.role, TableRole::ModelBasedTask);
    }
}
