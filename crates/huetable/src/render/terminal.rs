//! 24-bit ANSI terminal output.
//!
//! Each data cell is wrapped in its own background/foreground escapes and
//! closed with a reset, so colors never bleed into separators or borders.
//! The header row is never colored.

use std::io;

use console::Term;

use crate::border::{BorderChars, LineType};
use crate::plan::{Prepared, RenderPlan};
use crate::style::CellStyle;
use crate::util::pad_right;

const RESET: &str = "\x1b[0m";

/// Draws a [`RenderPlan`] as terminal text.
#[derive(Clone, Copy, Debug)]
pub struct TerminalRenderer {
    ansi: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        TerminalRenderer { ansi: true }
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables color escapes. Layout is identical either way.
    pub fn ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    /// Table lines only: borders, header and data rows.
    pub fn table_lines(&self, plan: &RenderPlan) -> Vec<String> {
        let widths = plan.layout().widths();
        let border = plan.options().border_style.chars();
        let separator = plan.options().separator.as_str();
        let mut lines = Vec::with_capacity(plan.rows().len() + 4);

        let headers: Vec<String> = (0..widths.len())
            .map(|col| pad_right(&plan.header(col), widths[col]))
            .collect();

        match border {
            Some(chars) => {
                let v = chars.vertical;
                lines.push(chars.line(widths, LineType::Top));
                lines.push(format!("{} {} {}", v, headers.join(format!(" {} ", v).as_str()), v));
                lines.push(chars.line(widths, LineType::Middle));
            }
            None => lines.push(headers.join(separator)),
        }

        let resolver = plan.resolver();
        for &row in plan.rows() {
            let cells: Vec<String> = (0..widths.len())
                .map(|col| {
                    let cell = plan.cell_with(&resolver, row, col);
                    self.paint(&pad_right(&cell.display, widths[col]), cell.style)
                })
                .collect();
            lines.push(self.join_row(&cells, border.as_ref(), separator));
        }

        if let Some(chars) = border {
            lines.push(chars.line(widths, LineType::Bottom));
        }
        lines
    }

    /// The table followed by a blank line, the summary and guidance.
    pub fn render(&self, plan: &RenderPlan) -> String {
        let mut lines = self.table_lines(plan);
        lines.push(String::new());
        lines.push(plan.summary().to_string());
        lines.extend(plan.summary().guidance());
        lines.join("\n")
    }

    /// Prints notices, then the table (or the empty-selection message), to
    /// stdout.
    ///
    /// Colors are dropped when `console` reports that stdout does not
    /// support them.
    pub fn print(&self, prepared: &Prepared) -> io::Result<()> {
        let term = Term::stdout();
        let renderer = self.ansi(self.ansi && console::colors_enabled());
        let notices = match prepared {
            Prepared::Ready(plan) => plan.notices(),
            Prepared::Empty { notices, .. } => notices.as_slice(),
        };
        for notice in notices {
            term.write_line(&notice.to_string())?;
        }
        match prepared {
            Prepared::Ready(plan) => term.write_line(&renderer.render(plan)),
            Prepared::Empty { selection, .. } => term.write_line(&selection.to_string()),
        }
    }

    fn paint(&self, text: &str, style: CellStyle) -> String {
        if !self.ansi {
            return text.to_string();
        }
        let mut out = String::new();
        if let Some(bg) = style.background {
            out.push_str(&bg.ansi_bg());
        }
        if let Some(fg) = style.foreground {
            out.push_str(&fg.ansi_fg());
        }
        out.push_str(text);
        out.push_str(RESET);
        out
    }

    fn join_row(&self, cells: &[String], border: Option<&BorderChars>, separator: &str) -> String {
        let reset = if self.ansi { RESET } else { "" };
        match border {
            Some(chars) => {
                let v = chars.vertical;
                format!(
                    "{} {}{} {}",
                    v,
                    cells.join(format!("{} {} ", reset, v).as_str()),
                    reset,
                    v
                )
            }
            None => cells.join(format!("{}{}", reset, separator).as_str()),
        }
    }
}
