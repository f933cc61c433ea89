//! Choosing which rows to show.
//!
//! A render shows either one page of rows, the rows of a set of groups, or
//! the whole table. The selection also produces a [`ViewSummary`] that
//! renderers print under the table.

use std::collections::BTreeSet;
use std::fmt;

use crate::group::GroupKey;
use crate::options::RenderOptions;
use crate::value::{format_value, CellValue};

/// How rows are selected for display.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    All,
    /// One page of `page_size` rows; `current_page` is 1-based and clamped.
    Rows { page_size: usize, current_page: usize },
    /// Rows whose group matches any of the values, in the order given.
    Groups(Vec<CellValue>),
}

impl Selection {
    /// Group pagination wins over row pagination when both are configured.
    pub fn from_options(options: &RenderOptions) -> Self {
        if let Some(groups) = &options.group_pagination {
            return Selection::Groups(groups.values());
        }
        match options.page_size {
            Some(page_size) => Selection::Rows {
                page_size,
                current_page: options.current_page,
            },
            None => Selection::All,
        }
    }
}

/// What part of the table a render shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewSummary {
    All { total: usize },
    Page {
        page: usize,
        total_pages: usize,
        /// 1-based first row, 0 when the page is empty.
        first: usize,
        last: usize,
        total: usize,
    },
    Groups {
        requested: Vec<CellValue>,
        /// Sorted distinct group keys of the full table.
        available: Vec<GroupKey>,
    },
}

impl ViewSummary {
    /// Hint lines telling the operator how to see the rest of the table.
    pub fn guidance(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match self {
            ViewSummary::Groups { available, .. } => {
                lines.push(format!("Available groups: {}", key_list(available)));
                lines.push(
                    "Set group_pagination to a list of group values to view specific groups"
                        .to_string(),
                );
            }
            ViewSummary::Page { .. } => {
                lines.push("Set current_page to N to view other pages".to_string());
            }
            ViewSummary::All { .. } => {}
        }
        lines.push("Set group_pagination to a group value to view by group".to_string());
        lines
    }
}

impl fmt::Display for ViewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewSummary::All { total } => write!(f, "Showing all {} rows", total),
            ViewSummary::Page {
                page,
                total_pages,
                first,
                last,
                total,
            } => write!(
                f,
                "Page {} of {} | Rows {}-{} of {}",
                page, total_pages, first, last, total
            ),
            ViewSummary::Groups {
                requested,
                available,
            } => write!(
                f,
                "Showing {} of {} groups: {}",
                requested.len(),
                available.len(),
                value_list(requested)
            ),
        }
    }
}

/// Group pagination matched no rows.
///
/// Nothing is rendered; the operator is told what was asked for and what
/// exists.
#[derive(Clone, Debug, PartialEq)]
pub struct EmptySelection {
    pub requested: Vec<CellValue>,
    pub available: Vec<GroupKey>,
}

impl fmt::Display for EmptySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "No data found for group(s): {}", value_list(&self.requested))?;
        write!(f, "Available groups: {}", key_list(&self.available))
    }
}

/// Rows to display plus a description of them.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSlice {
    /// Row indices into the table, in display order.
    pub rows: Vec<usize>,
    pub summary: ViewSummary,
}

/// Applies `selection` to a table whose rows have the given group keys.
pub fn select_view(
    group_keys: &[GroupKey],
    selection: &Selection,
) -> Result<ViewSlice, EmptySelection> {
    let total = group_keys.len();
    match selection {
        Selection::All => Ok(ViewSlice {
            rows: (0..total).collect(),
            summary: ViewSummary::All { total },
        }),
        Selection::Rows {
            page_size,
            current_page,
        } => {
            let page_size = (*page_size).max(1);
            let total_pages = total.div_ceil(page_size).max(1);
            let page = (*current_page).clamp(1, total_pages);
            let start = ((page - 1) * page_size).min(total);
            let end = (start + page_size).min(total);
            Ok(ViewSlice {
                rows: (start..end).collect(),
                summary: ViewSummary::Page {
                    page,
                    total_pages,
                    first: if end > start { start + 1 } else { 0 },
                    last: end,
                    total,
                },
            })
        }
        Selection::Groups(requested) => {
            let available: Vec<GroupKey> = group_keys
                .iter()
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            let rows: Vec<usize> = group_keys
                .iter()
                .enumerate()
                .filter(|(_, key)| requested.iter().any(|r| key.matches(r)))
                .map(|(row, _)| row)
                .collect();
            if rows.is_empty() {
                return Err(EmptySelection {
                    requested: requested.clone(),
                    available,
                });
            }
            Ok(ViewSlice {
                rows,
                summary: ViewSummary::Groups {
                    requested: requested.clone(),
                    available,
                },
            })
        }
    }
}

fn value_list(values: &[CellValue]) -> String {
    let items: Vec<String> = values.iter().map(|v| format_value(v, "null")).collect();
    format!("[{}]", items.join(", "))
}

fn key_list(keys: &[GroupKey]) -> String {
    let items: Vec<String> = keys.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> Vec<GroupKey> {
        values
            .iter()
            .map(|v| GroupKey(vec![CellValue::from(*v)]))
            .collect()
    }

    fn abc_groups() -> Vec<GroupKey> {
        keys(&["A", "A", "B", "C", "B", "C", "A"])
    }

    #[test]
    fn test_all_rows() {
        let slice = select_view(&keys(&["x", "y"]), &Selection::All).unwrap();
        assert_eq!(slice.rows, vec![0, 1]);
        assert_eq!(slice.summary.to_string(), "Showing all 2 rows");
    }

    #[test]
    fn test_row_pagination_clamps_to_last_page() {
        let group_keys = keys(&["g"; 18]);
        let slice = select_view(
            &group_keys,
            &Selection::Rows {
                page_size: 5,
                current_page: 5,
            },
        )
        .unwrap();
        assert_eq!(slice.rows, vec![15, 16, 17]);
        assert_eq!(slice.summary.to_string(), "Page 4 of 4 | Rows 16-18 of 18");
    }

    #[test]
    fn test_row_pagination_clamps_page_zero() {
        let group_keys = keys(&["g"; 7]);
        let slice = select_view(
            &group_keys,
            &Selection::Rows {
                page_size: 5,
                current_page: 0,
            },
        )
        .unwrap();
        assert_eq!(slice.rows, vec![0, 1, 2, 3, 4]);
        assert_eq!(slice.summary.to_string(), "Page 1 of 2 | Rows 1-5 of 7");
    }

    #[test]
    fn test_row_pagination_empty_table() {
        let slice = select_view(
            &[],
            &Selection::Rows {
                page_size: 5,
                current_page: 3,
            },
        )
        .unwrap();
        assert!(slice.rows.is_empty());
        assert_eq!(slice.summary.to_string(), "Page 1 of 1 | Rows 0-0 of 0");
    }

    #[test]
    fn test_group_pagination_filters_rows() {
        let requested = vec![CellValue::from("A"), CellValue::from("C")];
        let slice = select_view(&abc_groups(), &Selection::Groups(requested)).unwrap();
        assert_eq!(slice.rows, vec![0, 1, 3, 5, 6]);
        assert_eq!(
            slice.summary.to_string(),
            "Showing 2 of 3 groups: [A, C]"
        );
    }

    #[test]
    fn test_group_pagination_keeps_caller_order_in_summary() {
        let requested = vec![CellValue::from("C"), CellValue::from("A")];
        let slice = select_view(&abc_groups(), &Selection::Groups(requested)).unwrap();
        assert_eq!(slice.rows, vec![0, 1, 3, 5, 6]);
        assert!(slice.summary.to_string().ends_with("[C, A]"));
    }

    #[test]
    fn test_group_pagination_no_match_reports_available() {
        let err = select_view(
            &abc_groups(),
            &Selection::Groups(vec![CellValue::from("Z")]),
        )
        .unwrap_err();
        assert_eq!(err.available, keys(&["A", "B", "C"]));
        assert_eq!(
            err.to_string(),
            "No data found for group(s): [Z]\nAvailable groups: [A, B, C]"
        );
    }

    #[test]
    fn test_guidance_lines() {
        let summary = ViewSummary::Groups {
            requested: vec![CellValue::from("A")],
            available: keys(&["A", "B"]),
        };
        let lines = summary.guidance();
        assert_eq!(lines[0], "Available groups: [A, B]");
        assert_eq!(lines.len(), 3);
        assert_eq!(ViewSummary::All { total: 1 }.guidance().len(), 1);
    }

    #[test]
    fn test_selection_precedence() {
        let options = RenderOptions::new().page_size(5).group_pagination("A");
        assert_eq!(
            Selection::from_options(&options),
            Selection::Groups(vec![CellValue::from("A")])
        );
        let options = RenderOptions::new().page_size(5).current_page(2);
        assert_eq!(
            Selection::from_options(&options),
            Selection::Rows {
                page_size: 5,
                current_page: 2
            }
        );
    }
}
