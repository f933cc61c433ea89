//! Per-cell color resolution shared by every renderer.
//!
//! Renderers never decide colors themselves. They ask a [`StyleResolver`]
//! for the [`CellStyle`] of each `(row, column)` and draw whatever it returns.

use serde::{Deserialize, Serialize};

use crate::color::{contrasting_color, Palette, Rgb};
use crate::group::GroupKey;
use crate::value::CellValue;

static MISSING: CellValue = CellValue::Missing;

/// How group colors are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleMode {
    /// Group color fills the cell; text is black or white for contrast.
    #[default]
    Background,
    /// Group color is used for the text; no fill.
    Text,
}

/// Resolved colors for one cell. `None` means the medium's default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub background: Option<Rgb>,
    pub foreground: Option<Rgb>,
}

impl CellStyle {
    fn colored(mode: StyleMode, color: Rgb) -> Self {
        match mode {
            StyleMode::Background => CellStyle {
                background: Some(color),
                foreground: Some(contrasting_color(color)),
            },
            StyleMode::Text => CellStyle {
                background: None,
                foreground: Some(color),
            },
        }
    }
}

/// Secondary highlighting driven by the special column.
#[derive(Clone, Copy, Debug)]
pub struct SpecialHighlight<'a> {
    /// Display index of the special column.
    pub column: usize,
    /// Colors by special value, including the reserved missing entry.
    pub palette: &'a Palette<CellValue>,
    /// Special-column value of every row.
    pub values: &'a [CellValue],
    /// Extend the override to every column after `column`.
    pub persist: bool,
}

impl SpecialHighlight<'_> {
    fn applies_to(&self, column: usize) -> bool {
        column == self.column || (self.persist && column > self.column)
    }
}

/// Decides the colors of every cell in a render.
#[derive(Clone, Copy, Debug)]
pub struct StyleResolver<'a> {
    mode: StyleMode,
    group_palette: &'a Palette<GroupKey>,
    group_keys: &'a [GroupKey],
    special: Option<SpecialHighlight<'a>>,
}

impl<'a> StyleResolver<'a> {
    /// `group_keys` holds the group key of every row, indexed like the table.
    pub fn new(
        mode: StyleMode,
        group_palette: &'a Palette<GroupKey>,
        group_keys: &'a [GroupKey],
    ) -> Self {
        StyleResolver {
            mode,
            group_palette,
            group_keys,
            special: None,
        }
    }

    pub fn with_special(mut self, special: SpecialHighlight<'a>) -> Self {
        self.special = Some(special);
        self
    }

    /// Colors for the cell at `row` (table row index) and `column` (display
    /// index).
    ///
    /// The group color of the row is the base. When a special column is
    /// configured and covers `column`, the special color of the row replaces
    /// it: as text color in text mode, as fill plus contrasting text in
    /// background mode.
    pub fn resolve(&self, row: usize, column: usize) -> CellStyle {
        let base = self
            .group_keys
            .get(row)
            .and_then(|key| self.group_palette.get(key))
            .map(|color| CellStyle::colored(self.mode, color))
            .unwrap_or_default();

        let Some(special) = self.special.filter(|s| s.applies_to(column)) else {
            return base;
        };

        let value = special.values.get(row).unwrap_or(&MISSING);
        let color = special
            .palette
            .get(value)
            .or_else(|| special.palette.get(&CellValue::Missing));

        match color {
            Some(color) => CellStyle::colored(self.mode, color),
            None => base,
        }
    }
}
