use serde_json::Value;

use super::error::FilterError;
use super::types::{FilterWhereInfo, SqlResult};
use crate::database::gateway::{Record, Table};

/// Equality-only predicate over one table, rendered to parameterized SQL.
///
/// Every comparison is done on the text form of the column so that uuid,
/// timestamp and integer columns can be matched with plain string params.
#[derive(Debug, Clone)]
pub struct Filter {
    table: Table,
    where_data: Vec<FilterWhereInfo>,
    limit: Option<i32>,
}

impl Filter {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            where_data: vec![],
            limit: None,
        }
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn where_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Result<Self, FilterError> {
        let column = column.into();
        Self::validate_column(&column)?;
        let data = value.into();
        if matches!(data, Value::Array(_) | Value::Object(_)) {
            return Err(FilterError::UnsupportedValue {
                column,
                reason: "only scalar values can be compared".to_string(),
            });
        }
        self.where_data.push(FilterWhereInfo { column, data });
        Ok(self)
    }

    pub fn limit(mut self, limit: i32) -> Result<Self, FilterError> {
        if limit < 0 {
            return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string()));
        }
        self.limit = Some(limit);
        Ok(self)
    }

    /// Renders `SELECT row_to_json(t) AS row FROM (...) t` so rows decode as JSON objects.
    pub fn to_sql(&self) -> SqlResult {
        let mut params = Vec::new();
        let mut clauses = Vec::new();

        for info in &self.where_data {
            match scalar_text(&info.data) {
                Some(text) => {
                    params.push(text);
                    clauses.push(format!("\"{}\"::text = ${}", info.column, params.len()));
                }
                None => clauses.push(format!("\"{}\" IS NULL", info.column)),
            }
        }

        let inner = [
            format!("SELECT * FROM \"{}\"", self.table.name()),
            if clauses.is_empty() { String::new() } else { format!("WHERE {}", clauses.join(" AND ")) },
            self.limit.map(|l| format!("LIMIT {}", l)).unwrap_or_default(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult {
            query: format!("SELECT row_to_json(t) AS row FROM ({}) t", inner),
            params,
        }
    }

    /// In-process evaluation with the same text semantics as `to_sql`.
    pub fn matches(&self, record: &Record) -> bool {
        self.where_data.iter().all(|info| {
            let actual = record.get(&info.column).and_then(scalar_text);
            actual == scalar_text(&info.data)
        })
    }

    pub(crate) fn validate_column(column: &str) -> Result<(), FilterError> {
        let mut chars = column.chars();
        let valid = match chars.next() {
            Some(first) if first.is_ascii_lowercase() || first == '_' => {
                chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            }
            _ => false,
        };
        if valid {
            Ok(())
        } else {
            Err(FilterError::InvalidColumn(column.to_string()))
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
