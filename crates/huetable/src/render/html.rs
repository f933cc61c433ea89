//! Standalone HTML document output.
//!
//! The document is rendered from an embedded minijinja template. Cells carry
//! their colors as inline styles; truncated cells keep the full text in a
//! `data-full` attribute and expand on click.

use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::RenderError;
use crate::plan::RenderPlan;
use crate::style::CellStyle;

const TEMPLATE_NAME: &str = "table.html";

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    if let Err(err) = env.add_template(TEMPLATE_NAME, include_str!("../../templates/table.html.j2"))
    {
        tracing::error!(error = %err, "embedded table template failed to compile");
    }
    env
});

#[derive(Serialize)]
struct HeaderContext {
    text: String,
    full: String,
    truncated: bool,
}

#[derive(Serialize)]
struct CellContext {
    text: String,
    full: String,
    truncated: bool,
    style: String,
}

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    headers: Vec<HeaderContext>,
    rows: Vec<Vec<CellContext>>,
    summary: String,
    guidance: Vec<String>,
}

/// Draws a [`RenderPlan`] as an HTML document.
#[derive(Clone, Debug)]
pub struct HtmlRenderer {
    title: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        HtmlRenderer {
            title: "Table".to_string(),
        }
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document `<title>`.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn render(&self, plan: &RenderPlan) -> Result<String, RenderError> {
        let columns = plan.table().columns();
        let headers = columns
            .iter()
            .enumerate()
            .map(|(col, column)| {
                let text = plan.header(col);
                HeaderContext {
                    truncated: text != column.name(),
                    full: column.name().to_string(),
                    text,
                }
            })
            .collect();

        let resolver = plan.resolver();
        let rows = plan
            .rows()
            .iter()
            .map(|&row| {
                (0..columns.len())
                    .map(|col| {
                        let cell = plan.cell_with(&resolver, row, col);
                        CellContext {
                            style: inline_style(cell.style),
                            truncated: cell.truncated,
                            full: cell.text,
                            text: cell.display,
                        }
                    })
                    .collect()
            })
            .collect();

        let context = PageContext {
            title: &self.title,
            headers,
            rows,
            summary: plan.summary().to_string(),
            guidance: plan.summary().guidance(),
        };
        let template = ENV.get_template(TEMPLATE_NAME)?;
        Ok(template.render(context)?)
    }
}

/// CSS declarations for a cell, empty when the cell is unstyled.
fn inline_style(style: CellStyle) -> String {
    let mut css = Vec::new();
    if let Some(bg) = style.background {
        css.push(format!("background-color: {}", bg));
    }
    if let Some(fg) = style.foreground {
        css.push(format!("color: {}", fg));
    }
    css.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::options::RenderOptions;
    use crate::plan::{prepare, Prepared};
    use crate::style::StyleMode;
    use crate::table::Table;
    use crate::value::CellValue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn plan(options: RenderOptions) -> RenderPlan {
        let table = Table::new(vec![
            ("Group", vec![CellValue::from("A"), CellValue::from("B")]),
            (
                "Note",
                vec![CellValue::from("<b>bold</b>"), CellValue::from("a long piece of text")],
            ),
        ])
        .unwrap();
        let options = options.group_column("Group");
        match prepare(&table, &options, &mut StdRng::seed_from_u64(11)).unwrap() {
            Prepared::Ready(plan) => plan,
            Prepared::Empty { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_inline_style() {
        let style = CellStyle {
            background: Some(Rgb(100, 150, 200)),
            foreground: Some(Rgb::BLACK),
        };
        assert_eq!(inline_style(style), "background-color: #6496c8; color: #000000");
        assert_eq!(inline_style(CellStyle::default()), "");
    }

    #[test]
    fn test_document_structure() {
        let html = HtmlRenderer::new().render(&plan(RenderOptions::new())).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<th>Group</th>"));
        assert!(html.contains("background-color: #"));
        assert!(html.contains("<p class=\"summary\">Showing all 2 rows</p>"));
        assert!(html.contains("classList.toggle(\"highlight\")"));
    }

    #[test]
    fn test_truncated_cells_keep_full_text() {
        let html = HtmlRenderer::new()
            .render(&plan(RenderOptions::new().max_column_width(10)))
            .unwrap();
        assert!(html.contains("class=\"truncated\" data-full=\"a long piece of text\""));
        assert!(html.contains(">a long ...</td>"));
    }

    #[test]
    fn test_truncated_headers_expand_like_cells() {
        let table = Table::new(vec![
            ("Group", vec![CellValue::from("A")]),
            ("Description", vec![CellValue::from("x")]),
        ])
        .unwrap();
        let options = RenderOptions::new().group_column("Group").max_column_width(6);
        let plan = match prepare(&table, &options, &mut StdRng::seed_from_u64(2)).unwrap() {
            Prepared::Ready(plan) => plan,
            Prepared::Empty { .. } => unreachable!(),
        };
        let html = HtmlRenderer::new().render(&plan).unwrap();
        assert!(html.contains(
            "<th class=\"truncated\" data-full=\"Description\" data-short=\"Des...\""
        ));
        assert!(html.contains("\"table.huetable th.truncated, table.huetable td.truncated\""));
    }

    #[test]
    fn test_cell_text_is_escaped() {
        let html = HtmlRenderer::new().render(&plan(RenderOptions::new())).unwrap();
        assert!(html.contains("&lt;b&gt;bold&lt;"));
        assert!(!html.contains("<b>bold"));
    }

    #[test]
    fn test_text_mode_uses_color_only() {
        let html = HtmlRenderer::new()
            .title("Scores")
            .render(&plan(RenderOptions::new().style_mode(StyleMode::Text)))
            .unwrap();
        assert!(html.contains("<title>Scores</title>"));
        assert!(!html.contains("style=\"background-color"));
        assert!(html.contains("style=\"color: #"));
    }
}
