//! Render planning.
//!
//! [`prepare`] turns a table and its options into a [`RenderPlan`]: the
//! resolved group and special columns, the rows to show, the colors, and the
//! column widths. Every renderer draws from the same plan, so terminal, HTML
//! and spreadsheet output agree cell for cell.

use rand::Rng;

use crate::color::{generate_color, Palette};
use crate::error::RenderError;
use crate::group::GroupKey;
use crate::layout::{compute_widths, resolve_columns, ColumnResolution, LayoutPlan};
use crate::notice::Notice;
use crate::options::RenderOptions;
use crate::style::{CellStyle, SpecialHighlight, StyleResolver};
use crate::table::Table;
use crate::value::{format_value, truncate, CellValue};
use crate::view::{select_view, EmptySelection, Selection, ViewSummary};

/// Result of planning a render.
#[derive(Debug)]
pub enum Prepared {
    Ready(RenderPlan),
    /// Group pagination matched no rows; there is nothing to draw.
    Empty {
        selection: EmptySelection,
        notices: Vec<Notice>,
    },
}

/// One cell, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedCell<'a> {
    /// Full formatted text, placeholder substituted.
    pub text: String,
    /// `text` cut to the column width.
    pub display: String,
    pub truncated: bool,
    pub style: CellStyle,
    pub value: &'a CellValue,
}

/// Everything a renderer needs, computed once.
#[derive(Debug)]
pub struct RenderPlan {
    table: Table,
    group_columns: Vec<usize>,
    special_column: Option<usize>,
    group_keys: Vec<GroupKey>,
    special_values: Vec<CellValue>,
    rows: Vec<usize>,
    summary: ViewSummary,
    layout: LayoutPlan,
    group_palette: Palette<GroupKey>,
    special_palette: Option<Palette<CellValue>>,
    options: RenderOptions,
    notices: Vec<Notice>,
}

impl RenderPlan {
    /// The working table. It may carry a synthesized row-index column in
    /// front of the caller's columns.
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn group_columns(&self) -> &[usize] {
        &self.group_columns
    }

    pub fn special_column(&self) -> Option<usize> {
        self.special_column
    }

    /// Group key of every row of [`table`](Self::table).
    pub fn group_keys(&self) -> &[GroupKey] {
        &self.group_keys
    }

    /// Rows to draw, in order.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn summary(&self) -> &ViewSummary {
        &self.summary
    }

    pub fn layout(&self) -> &LayoutPlan {
        &self.layout
    }

    pub fn group_palette(&self) -> &Palette<GroupKey> {
        &self.group_palette
    }

    pub fn special_palette(&self) -> Option<&Palette<CellValue>> {
        self.special_palette.as_ref()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn resolver(&self) -> StyleResolver<'_> {
        let resolver = StyleResolver::new(
            self.options.style_mode,
            &self.group_palette,
            &self.group_keys,
        );
        match (self.special_column, &self.special_palette) {
            (Some(column), Some(palette)) => resolver.with_special(SpecialHighlight {
                column,
                palette,
                values: &self.special_values,
                persist: self.options.persist_special_color,
            }),
            _ => resolver,
        }
    }

    /// Header text of `column`, cut to the column width.
    pub fn header(&self, column: usize) -> String {
        let name = self.table.columns()[column].name();
        match self.layout.width(column) {
            Some(width) => truncate(name, width),
            None => name.to_string(),
        }
    }

    /// The cell at `row` (table row index) and `column`.
    pub fn cell(&self, row: usize, column: usize) -> PlannedCell<'_> {
        self.cell_with(&self.resolver(), row, column)
    }

    /// Like [`cell`](Self::cell), reusing a resolver across many cells.
    pub fn cell_with(
        &self,
        resolver: &StyleResolver<'_>,
        row: usize,
        column: usize,
    ) -> PlannedCell<'_> {
        let value = self.table.value(row, column);
        let text = format_value(value, &self.options.null_placeholder);
        let display = match self.layout.width(column) {
            Some(width) => truncate(&text, width),
            None => text.clone(),
        };
        PlannedCell {
            truncated: display != text,
            text,
            display,
            style: resolver.resolve(row, column),
            value,
        }
    }
}

/// Plans a render of `table`.
///
/// Options are validated first. Unknown group or special columns are
/// replaced by fallbacks and reported as notices, which are also logged.
/// Colors are drawn from `rng`: one per distinct group key, one per distinct
/// non-missing special value, and one reserved for missing special values.
pub fn prepare<R: Rng + ?Sized>(
    table: &Table,
    options: &RenderOptions,
    rng: &mut R,
) -> Result<Prepared, RenderError> {
    options.validate()?;

    let ColumnResolution {
        table,
        group_columns,
        special_column,
        notices,
    } = resolve_columns(
        table,
        &options.group_columns,
        options.special_column.as_deref(),
        options.output.supports_multi_group(),
    );
    for notice in &notices {
        notice.emit();
    }

    let group_keys = GroupKey::for_rows(&table, &group_columns);
    let slice = match select_view(&group_keys, &Selection::from_options(options)) {
        Ok(slice) => slice,
        Err(selection) => {
            tracing::debug!(
                requested = selection.requested.len(),
                available = selection.available.len(),
                "group selection matched no rows"
            );
            return Ok(Prepared::Empty { selection, notices });
        }
    };

    let group_palette = Palette::generate(group_keys.iter().cloned(), rng);
    let (special_values, special_palette) = match special_column {
        Some(col) => {
            let values = table.columns()[col].values().to_vec();
            let mut palette =
                Palette::generate(values.iter().filter(|v| !v.is_missing()).cloned(), rng);
            palette.insert(CellValue::Missing, generate_color(rng));
            (values, Some(palette))
        }
        None => (Vec::new(), None),
    };

    let layout = compute_widths(
        &table,
        &slice.rows,
        &options.null_placeholder,
        options.max_column_width,
        options.width_scale,
    );

    tracing::debug!(
        rows = slice.rows.len(),
        groups = group_palette.len(),
        summary = %slice.summary,
        "render plan ready"
    );

    Ok(Prepared::Ready(RenderPlan {
        table,
        group_columns,
        special_column,
        group_keys,
        special_values,
        rows: slice.rows,
        summary: slice.summary,
        layout,
        group_palette,
        special_palette,
        options: options.clone(),
        notices,
    }))
}
