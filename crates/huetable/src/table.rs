//! In-memory table model.
//!
//! A [`Table`] is an ordered list of named columns holding [`CellValue`]s.
//! Construction checks that every column has the same length and that names
//! are unique; nothing downstream repairs a malformed table.

use std::collections::HashSet;
use std::io::Read;

use crate::error::TableError;
use crate::value::CellValue;

/// A named column of cell values.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<CellValue>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }
}

/// An ordered collection of equal-length named columns.
///
/// # Example
///
/// ```rust
/// use huetable::{CellValue, Table};
///
/// let table = Table::new(vec![
///     ("Group", vec![CellValue::from("A"), CellValue::from("B")]),
///     ("Score", vec![CellValue::from(10), CellValue::Missing]),
/// ])
/// .unwrap();
///
/// assert_eq!(table.num_rows(), 2);
/// assert_eq!(table.column_index("Score"), Some(1));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Builds a table from `(name, values)` pairs.
    pub fn new<I, S>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, Vec<CellValue>)>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut out: Vec<Column> = Vec::new();
        let mut rows = None;

        for (name, values) in columns {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(TableError::DuplicateColumn(name));
            }
            let expected = *rows.get_or_insert(values.len());
            if values.len() != expected {
                return Err(TableError::LengthMismatch {
                    column: name,
                    expected,
                    found: values.len(),
                });
            }
            let values = values.into_iter().map(CellValue::normalized).collect();
            out.push(Column { name, values });
        }

        Ok(Table {
            columns: out,
            rows: rows.unwrap_or(0),
        })
    }

    /// Builds a table from a header row and row-major data.
    pub fn from_rows<S: AsRef<str>>(
        headers: &[S],
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, TableError> {
        let mut columns: Vec<Vec<CellValue>> = vec![Vec::with_capacity(rows.len()); headers.len()];
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                return Err(TableError::RaggedRow {
                    row: i,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
            for (col, value) in columns.iter_mut().zip(row) {
                col.push(value);
            }
        }
        Table::new(headers.iter().map(|h| h.as_ref().to_string()).zip(columns))
    }

    /// Builds a table from a JSON array of objects.
    ///
    /// Columns appear in first-seen key order. Keys absent from a record
    /// become missing values.
    pub fn from_json_records(value: &serde_json::Value) -> Result<Self, TableError> {
        let records = value
            .as_array()
            .ok_or(TableError::NotRecords(json_kind(value)))?;

        let mut headers: Vec<String> = Vec::new();
        for record in records {
            let obj = record
                .as_object()
                .ok_or(TableError::NotRecords(json_kind(record)))?;
            for key in obj.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .filter_map(|r| r.as_object())
            .map(|obj| {
                headers
                    .iter()
                    .map(|h| obj.get(h).map_or(CellValue::Missing, CellValue::from))
                    .collect()
            })
            .collect();

        Table::from_rows(&headers, rows)
    }

    /// Reads a table from CSV with a header row.
    ///
    /// Empty fields become missing values, fields that parse as numbers become
    /// numbers, everything else is text.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(parse_csv_field).collect());
        }
        Table::from_rows(&headers, rows)
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Returns the value at `row` of column `col`.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn value(&self, row: usize, col: usize) -> &CellValue {
        &self.columns[col].values[row]
    }

    /// Distinct values of a column in first-seen order.
    pub fn distinct_values(&self, col: usize) -> Vec<&CellValue> {
        let mut seen = HashSet::new();
        self.columns[col]
            .values
            .iter()
            .filter(|v| seen.insert(*v))
            .collect()
    }

    /// Number of distinct non-missing values in a column.
    pub fn distinct_count(&self, col: usize) -> usize {
        self.columns[col]
            .values
            .iter()
            .filter(|v| !v.is_missing())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Returns a copy with a row-number column inserted in front.
    ///
    /// The column is called `index`, or `level_0` when `index` is taken.
    pub(crate) fn with_row_index(&self) -> (Table, String) {
        let name = if self.column_index("index").is_none() {
            "index".to_string()
        } else {
            (0..)
                .map(|n| format!("level_{}", n))
                .find(|candidate| self.column_index(candidate).is_none())
                .unwrap_or_default()
        };
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(Column {
            name: name.clone(),
            values: (0..self.rows).map(CellValue::from).collect(),
        });
        columns.extend(self.columns.iter().cloned());
        (
            Table {
                columns,
                rows: self.rows,
            },
            name,
        )
    }
}

fn parse_csv_field(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Missing;
    }
    match field.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(field.to_string()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
