//! Column selection and sizing.
//!
//! The planner decides which column(s) drive grouping, which column (if any)
//! drives special highlighting, and how wide each displayed column is. Bad
//! column names never fail a render: they are replaced by a fallback and
//! reported as [`Notice`]s.

use crate::notice::Notice;
use crate::table::Table;
use crate::util::display_width;
use crate::value::format_value;

/// Picks a default group column.
///
/// Columns with at least 2 and fewer than `rows / 2` distinct values are
/// candidates; the candidate with the fewest distinct values wins. When no
/// column qualifies, the column with the fewest distinct values overall is
/// used. Ties go to the leftmost column. Returns `None` only for a table
/// without columns.
pub fn choose_group_column(table: &Table) -> Option<usize> {
    let counts: Vec<usize> = (0..table.num_columns())
        .map(|col| table.distinct_count(col))
        .collect();
    let half = table.num_rows() as f64 / 2.0;

    let qualifying = counts
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, count)| count >= 2 && (count as f64) < half);
    fewest(qualifying).or_else(|| fewest(counts.iter().copied().enumerate()))
}

/// Index of the `(index, count)` pair with the lowest count, leftmost on ties.
fn fewest(candidates: impl Iterator<Item = (usize, usize)>) -> Option<usize> {
    candidates
        .min_by_key(|&(col, count)| (count, col))
        .map(|(col, _)| col)
}

/// Display width of every column, aligned with the table's column order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutPlan {
    widths: Vec<usize>,
}

impl LayoutPlan {
    pub fn width(&self, column: usize) -> Option<usize> {
        self.widths.get(column).copied()
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }
}

/// Computes display widths from the header and the displayed rows.
///
/// Each column's natural width is the widest of its header and its formatted
/// values in `rows`. The natural width is multiplied by `scale` (rounded
/// down) and capped at `max_width`.
pub fn compute_widths(
    table: &Table,
    rows: &[usize],
    placeholder: &str,
    max_width: usize,
    scale: f64,
) -> LayoutPlan {
    let widths = table
        .columns()
        .iter()
        .enumerate()
        .map(|(col, column)| {
            let data = rows
                .iter()
                .map(|&row| display_width(&format_value(table.value(row, col), placeholder)))
                .max()
                .unwrap_or(0);
            let natural = display_width(column.name()).max(data);
            let scaled = (natural as f64 * scale).floor() as usize;
            scaled.min(max_width)
        })
        .collect();
    LayoutPlan { widths }
}

/// Outcome of validating the requested group and special columns.
#[derive(Clone, Debug)]
pub struct ColumnResolution {
    /// Working copy of the table, possibly with a synthesized row-index column.
    pub table: Table,
    /// Group column indices into `table`, never empty.
    pub group_columns: Vec<usize>,
    pub special_column: Option<usize>,
    pub notices: Vec<Notice>,
}

/// Validates the requested columns against `table`.
///
/// - No group column requested: one is chosen with [`choose_group_column`];
///   if the table has no columns, a row-index column is synthesized.
/// - A requested group column that does not exist falls back to the row index
///   (or is dropped, when `multi_group` and other requested columns exist).
/// - With `multi_group` off, only the first requested group column is used.
/// - An unknown special column disables special highlighting.
pub fn resolve_columns(
    table: &Table,
    requested_groups: &[String],
    requested_special: Option<&str>,
    multi_group: bool,
) -> ColumnResolution {
    let mut notices = Vec::new();
    let mut working = table.clone();
    let mut groups: Vec<usize> = Vec::new();

    let requested: &[String] = if !multi_group && requested_groups.len() > 1 {
        notices.push(Notice::ExtraGroupColumnsIgnored {
            used: requested_groups[0].clone(),
            ignored: requested_groups[1..].to_vec(),
        });
        &requested_groups[..1]
    } else {
        requested_groups
    };

    let mut fallback_reason: Option<Option<String>> = None;
    if requested.is_empty() {
        match choose_group_column(table) {
            Some(col) => {
                notices.push(Notice::AutoSelectedGroup {
                    column: table.columns()[col].name().to_string(),
                    distinct: table.distinct_count(col),
                });
                groups.push(col);
            }
            None => fallback_reason = Some(None),
        }
    } else {
        let mut missing = Vec::new();
        for name in requested {
            match table.column_index(name) {
                Some(col) if !groups.contains(&col) => groups.push(col),
                Some(_) => {}
                None => missing.push(name.clone()),
            }
        }
        if groups.is_empty() {
            // Report the first unknown name as the reason for the fallback
            let mut missing = missing.into_iter();
            fallback_reason = Some(missing.next());
            notices.extend(
                missing.map(|requested| Notice::UnknownGroupColumnDropped { requested }),
            );
        } else {
            notices.extend(
                missing
                    .into_iter()
                    .map(|requested| Notice::UnknownGroupColumnDropped { requested }),
            );
        }
    }

    if let Some(reason) = fallback_reason {
        let (indexed, name) = table.with_row_index();
        working = indexed;
        groups = vec![0];
        notices.push(match reason {
            Some(requested) => Notice::MissingGroupColumn {
                requested,
                fallback: name,
            },
            None => Notice::NoGroupCandidate { fallback: name },
        });
    }

    let special_column = requested_special.and_then(|name| {
        let found = working.column_index(name);
        if found.is_none() {
            notices.push(Notice::MissingSpecialColumn {
                requested: name.to_string(),
            });
        }
        found
    });

    tracing::debug!(
        group_columns = ?groups,
        special_column = ?special_column,
        "resolved render columns"
    );

    ColumnResolution {
        table: working,
        group_columns: groups,
        special_column,
        notices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    fn column(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    fn ten_rows() -> Table {
        Table::new(vec![
            ("id", (0..10).map(CellValue::from).collect()),
            ("A", column(&["x", "y", "x", "y", "x", "y", "x", "y", "x", "y"])),
            ("B", column(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "9"])),
        ])
        .unwrap()
    }

    #[test]
    fn test_choose_group_prefers_fewest_qualifying() {
        assert_eq!(choose_group_column(&ten_rows()), Some(1));
    }

    #[test]
    fn test_choose_group_falls_back_to_global_minimum() {
        // 4 rows: every column has >= 2 distinct values, none below rows/2
        let table = Table::new(vec![
            ("a", column(&["1", "2", "3", "4"])),
            ("b", column(&["x", "x", "y", "z"])),
        ])
        .unwrap();
        assert_eq!(choose_group_column(&table), Some(1));
    }

    #[test]
    fn test_choose_group_ties_go_left() {
        let table = Table::new(vec![
            ("a", column(&["k"; 6])),
            ("b", column(&["k"; 6])),
        ])
        .unwrap();
        assert_eq!(choose_group_column(&table), Some(0));
    }

    #[test]
    fn test_choose_group_empty_table() {
        assert_eq!(choose_group_column(&Table::default()), None);
    }

    #[test]
    fn test_widths_capped() {
        let table = Table::new(vec![("ID", column(&["abc", "abcdefgh"]))]).unwrap();
        assert_eq!(compute_widths(&table, &[0, 1], "N/A", 20, 1.0).widths(), &[8]);
        assert_eq!(compute_widths(&table, &[0, 1], "N/A", 5, 1.0).widths(), &[5]);
    }

    #[test]
    fn test_widths_only_count_displayed_rows() {
        let table = Table::new(vec![("ID", column(&["abc", "abcdefgh"]))]).unwrap();
        assert_eq!(compute_widths(&table, &[0], "N/A", 20, 1.0).widths(), &[3]);
    }

    #[test]
    fn test_widths_include_placeholder_and_header() {
        let table = Table::new(vec![("Name", vec![CellValue::Missing])]).unwrap();
        assert_eq!(compute_widths(&table, &[0], "<NULL>", 20, 1.0).widths(), &[6]);
        assert_eq!(compute_widths(&table, &[0], "-", 20, 1.0).widths(), &[4]);
    }

    #[test]
    fn test_widths_scale() {
        let table = Table::new(vec![("ID", column(&["abcdefghij"]))]).unwrap();
        assert_eq!(compute_widths(&table, &[0], "N/A", 20, 1.7).widths(), &[17]);
        assert_eq!(compute_widths(&table, &[0], "N/A", 15, 1.7).widths(), &[15]);
    }

    #[test]
    fn test_resolve_auto_selects_with_notice() {
        let resolution = resolve_columns(&ten_rows(), &[], None, false);
        assert_eq!(resolution.group_columns, vec![1]);
        assert_eq!(
            resolution.notices,
            vec![Notice::AutoSelectedGroup {
                column: "A".into(),
                distinct: 2
            }]
        );
    }

    #[test]
    fn test_resolve_missing_group_falls_back_to_index() {
        let resolution = resolve_columns(&ten_rows(), &["Team".to_string()], None, false);
        assert_eq!(resolution.group_columns, vec![0]);
        assert_eq!(resolution.table.columns()[0].name(), "index");
        assert_eq!(resolution.table.num_columns(), 4);
        assert_eq!(
            resolution.notices,
            vec![Notice::MissingGroupColumn {
                requested: "Team".into(),
                fallback: "index".into()
            }]
        );
    }

    #[test]
    fn test_resolve_no_columns_synthesizes_index() {
        let resolution = resolve_columns(&Table::default(), &[], None, false);
        assert_eq!(resolution.group_columns, vec![0]);
        assert!(matches!(
            resolution.notices.as_slice(),
            [Notice::NoGroupCandidate { .. }]
        ));
    }

    #[test]
    fn test_resolve_special_column_index_follows_working_table() {
        let resolution =
            resolve_columns(&ten_rows(), &["nope".to_string()], Some("B"), false);
        // index column was inserted in front
        assert_eq!(resolution.special_column, Some(3));
    }

    #[test]
    fn test_resolve_unknown_special_is_dropped() {
        let resolution = resolve_columns(&ten_rows(), &["A".to_string()], Some("zzz"), false);
        assert_eq!(resolution.group_columns, vec![1]);
        assert_eq!(resolution.special_column, None);
        assert_eq!(
            resolution.notices,
            vec![Notice::MissingSpecialColumn {
                requested: "zzz".into()
            }]
        );
    }

    #[test]
    fn test_resolve_single_group_ignores_extras() {
        let groups = vec!["A".to_string(), "B".to_string()];
        let resolution = resolve_columns(&ten_rows(), &groups, None, false);
        assert_eq!(resolution.group_columns, vec![1]);
        assert!(matches!(
            resolution.notices.as_slice(),
            [Notice::ExtraGroupColumnsIgnored { .. }]
        ));
    }

    #[test]
    fn test_resolve_multi_group_drops_unknown() {
        let groups = vec!["B".to_string(), "x".to_string(), "A".to_string()];
        let resolution = resolve_columns(&ten_rows(), &groups, None, true);
        assert_eq!(resolution.group_columns, vec![2, 1]);
        assert_eq!(
            resolution.notices,
            vec![Notice::UnknownGroupColumnDropped {
                requested: "x".into()
            }]
        );
    }
}
