//! JSON serialization of analysis results.

use serde::Serialize;

/// Serialize any result object to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for the
/// crate's result types).
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Serialize any result object to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for the
/// crate's result types).
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Table, Value};

    #[test]
    fn table_serializes_with_null_for_missing() {
        let mut table = Table::new("t", vec!["a".to_string(), "b".to_string()]);
        table.push_row(vec![Value::Num(1.0), Value::Missing]);
        table.push_row(vec![Value::Str("x".into()), Value::Num(2.5)]);

        let json = to_json(&table).unwrap();
        assert_eq!(
            json,
            r#"{"name":"t","columns":["a","b"],"rows":[[1.0,null],["x",2.5]]}"#
        );
    }

    #[test]
    fn pretty_output_is_multiline() {
        let table = Table::new("t", vec!["a".to_string()]);
        let pretty = to_json_pretty(&table).unwrap();
        assert!(pretty.contains('\n'));
    }
}
