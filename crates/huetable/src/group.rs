//! Group keys: the tuple of group-column values that buckets a row.

use std::fmt;

use crate::table::Table;
use crate::value::{format_value, CellValue};

/// Separator between components of a multi-column key.
const KEY_SEPARATOR: &str = " / ";

/// The group a row belongs to.
///
/// Single-column grouping produces one-element keys. Spreadsheet output can
/// group by several columns, in which case the key holds one value per group
/// column in order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(pub Vec<CellValue>);

impl GroupKey {
    /// Collects the key of every row in `table`.
    pub fn for_rows(table: &Table, group_columns: &[usize]) -> Vec<GroupKey> {
        (0..table.num_rows())
            .map(|row| {
                GroupKey(
                    group_columns
                        .iter()
                        .map(|&col| table.value(row, col).clone())
                        .collect(),
                )
            })
            .collect()
    }

    /// Whether a caller-supplied group value selects this key.
    ///
    /// A single-column key matches its value directly. A multi-column key is
    /// matched by a list holding the same components.
    pub fn matches(&self, requested: &CellValue) -> bool {
        match self.0.as_slice() {
            [single] => single == requested,
            parts => matches!(requested, CellValue::List(items) if items.as_slice() == parts),
        }
    }

    /// Display text, with missing components rendered as `placeholder`.
    pub fn display(&self, placeholder: &str) -> String {
        self.0
            .iter()
            .map(|v| format_value(v, placeholder))
            .collect::<Vec<_>>()
            .join(KEY_SEPARATOR)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display("null"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_key_matches_value() {
        let key = GroupKey(vec![CellValue::from("A")]);
        assert!(key.matches(&CellValue::from("A")));
        assert!(!key.matches(&CellValue::from("B")));
    }

    #[test]
    fn test_multi_key_matches_list() {
        let key = GroupKey(vec![CellValue::from("A"), CellValue::from(1)]);
        assert!(key.matches(&CellValue::from(vec![
            CellValue::from("A"),
            CellValue::from(1)
        ])));
        assert!(!key.matches(&CellValue::from("A")));
        assert_eq!(key.to_string(), "A / 1");
    }

    #[test]
    fn test_for_rows() {
        let table = Table::new(vec![
            ("g", vec![CellValue::from("x"), CellValue::from("y")]),
            ("h", vec![CellValue::from(1), CellValue::Missing]),
        ])
        .unwrap();
        let keys = GroupKey::for_rows(&table, &[0, 1]);
        assert_eq!(keys[1].display("-"), "y / -");
    }
}
