//! xlsx workbook output.
//!
//! One worksheet: a bold header row, then the displayed rows with the same
//! fills and font colors the terminal would use. Cells hold their full,
//! untruncated values; numbers stay numeric.

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet};

use crate::error::RenderError;
use crate::plan::RenderPlan;
use crate::style::CellStyle;
use crate::value::{format_value, CellValue};

/// Extra character columns added to every planned width.
const WIDTH_PADDING: f64 = 2.0;

/// Draws a [`RenderPlan`] into an xlsx workbook.
#[derive(Clone, Debug)]
pub struct XlsxRenderer {
    sheet_name: String,
}

impl Default for XlsxRenderer {
    fn default() -> Self {
        XlsxRenderer {
            sheet_name: "Sheet1".to_string(),
        }
    }
}

impl XlsxRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Builds the workbook in memory.
    pub fn workbook(&self, plan: &RenderPlan) -> Result<Workbook, RenderError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;
        self.write_sheet(worksheet, plan)?;
        Ok(workbook)
    }

    /// Renders the workbook to xlsx bytes.
    pub fn render(&self, plan: &RenderPlan) -> Result<Vec<u8>, RenderError> {
        let mut workbook = self.workbook(plan)?;
        Ok(workbook.save_to_buffer()?)
    }

    fn write_sheet(&self, worksheet: &mut Worksheet, plan: &RenderPlan) -> Result<(), RenderError> {
        let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
        for (col, column) in plan.table().columns().iter().enumerate() {
            worksheet.write_string_with_format(0, cast_col(col)?, column.name(), &header_format)?;
        }

        let placeholder = plan.options().null_placeholder.as_str();
        let resolver = plan.resolver();
        for (offset, &row) in plan.rows().iter().enumerate() {
            let sheet_row = cast_row(offset + 1)?;
            for col in 0..plan.table().num_columns() {
                let sheet_col = cast_col(col)?;
                let format = cell_format(resolver.resolve(row, col));
                match plan.table().value(row, col) {
                    CellValue::Number(n) if n.is_finite() => {
                        worksheet.write_number_with_format(sheet_row, sheet_col, *n, &format)?;
                    }
                    value if value.is_missing() => {
                        worksheet.write_string_with_format(
                            sheet_row,
                            sheet_col,
                            placeholder,
                            &format,
                        )?;
                    }
                    value => {
                        let text = format_value(value, placeholder);
                        worksheet.write_string_with_format(sheet_row, sheet_col, &text, &format)?;
                    }
                }
            }
        }

        for (col, width) in plan.layout().widths().iter().enumerate() {
            worksheet.set_column_width(cast_col(col)?, *width as f64 + WIDTH_PADDING)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        tracing::debug!(
            sheet = %self.sheet_name,
            rows = plan.rows().len(),
            columns = plan.table().num_columns(),
            "worksheet written"
        );
        Ok(())
    }
}

fn cell_format(style: CellStyle) -> Format {
    let mut format = Format::new().set_border(FormatBorder::Thin);
    if let Some(bg) = style.background {
        format = format.set_background_color(Color::RGB(bg.to_u32()));
    }
    if let Some(fg) = style.foreground {
        format = format.set_font_color(Color::RGB(fg.to_u32()));
    }
    format
}

fn cast_row(index: usize) -> Result<u32, RenderError> {
    u32::try_from(index).map_err(|_| RenderError::SheetBounds { axis: "row", index })
}

fn cast_col(index: usize) -> Result<u16, RenderError> {
    u16::try_from(index).map_err(|_| RenderError::SheetBounds {
        axis: "column",
        index,
    })
}
