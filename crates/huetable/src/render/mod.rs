//! Output renderers.
//!
//! All renderers draw from a [`RenderPlan`](crate::RenderPlan), so they agree
//! on rows, widths and colors. [`render`] prepares a plan and dispatches on
//! [`RenderOptions::output`].

mod html;
mod terminal;
#[cfg(feature = "xlsx")]
mod xlsx;

pub use html::HtmlRenderer;
pub use terminal::TerminalRenderer;
#[cfg(feature = "xlsx")]
pub use xlsx::XlsxRenderer;

use crate::error::RenderError;
use crate::notice::Notice;
use crate::options::{OutputTarget, RenderOptions};
use crate::plan::{prepare, Prepared, RenderPlan};
use crate::table::Table;
use crate::view::{EmptySelection, ViewSummary};

/// Rendered output for one target.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutput {
    /// ANSI-colored terminal text, summary included.
    Text(String),
    /// A complete HTML document.
    Markup(String),
    /// xlsx file contents.
    #[cfg(feature = "xlsx")]
    Workbook(Vec<u8>),
}

impl RenderOutput {
    /// Raw bytes, as written to a file.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RenderOutput::Text(text) | RenderOutput::Markup(text) => text.as_bytes(),
            #[cfg(feature = "xlsx")]
            RenderOutput::Workbook(bytes) => bytes,
        }
    }
}

/// Result of [`render`].
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome {
    Rendered {
        output: RenderOutput,
        summary: ViewSummary,
        notices: Vec<Notice>,
    },
    /// Group pagination matched nothing; no output was produced.
    Empty {
        selection: EmptySelection,
        notices: Vec<Notice>,
    },
}

impl RenderOutcome {
    pub fn notices(&self) -> &[Notice] {
        match self {
            RenderOutcome::Rendered { notices, .. } | RenderOutcome::Empty { notices, .. } => {
                notices
            }
        }
    }

    pub fn output(&self) -> Option<&RenderOutput> {
        match self {
            RenderOutcome::Rendered { output, .. } => Some(output),
            RenderOutcome::Empty { .. } => None,
        }
    }
}

/// Renders `table` for `options.output`, drawing colors from the thread RNG.
///
/// Terminal text always includes escapes here; use [`TerminalRenderer`]
/// directly to drop them.
///
/// # Example
///
/// ```rust
/// use huetable::{render, CellValue, RenderOptions, RenderOutcome, RenderOutput, Table};
///
/// let table = Table::new(vec![
///     ("Group", vec![CellValue::from("A"), CellValue::from("B")]),
///     ("Score", vec![CellValue::from(1), CellValue::from(2)]),
/// ])
/// .unwrap();
///
/// let outcome = render(&table, &RenderOptions::new().group_column("Group")).unwrap();
/// match outcome {
///     RenderOutcome::Rendered { output: RenderOutput::Text(text), summary, .. } => {
///         assert!(text.contains("Score"));
///         assert_eq!(summary.to_string(), "Showing all 2 rows");
///     }
///     other => panic!("unexpected outcome: {:?}", other),
/// }
/// ```
pub fn render(table: &Table, options: &RenderOptions) -> Result<RenderOutcome, RenderError> {
    let mut rng = rand::rng();
    match prepare(table, options, &mut rng)? {
        Prepared::Ready(plan) => {
            let output = render_plan(&plan)?;
            Ok(RenderOutcome::Rendered {
                output,
                summary: plan.summary().clone(),
                notices: plan.notices().to_vec(),
            })
        }
        Prepared::Empty { selection, notices } => Ok(RenderOutcome::Empty { selection, notices }),
    }
}

/// Draws an already prepared plan for `plan.options().output`.
pub fn render_plan(plan: &RenderPlan) -> Result<RenderOutput, RenderError> {
    match plan.options().output {
        OutputTarget::Terminal => Ok(RenderOutput::Text(TerminalRenderer::new().render(plan))),
        OutputTarget::Markup => Ok(RenderOutput::Markup(HtmlRenderer::new().render(plan)?)),
        #[cfg(feature = "xlsx")]
        OutputTarget::Spreadsheet => Ok(RenderOutput::Workbook(XlsxRenderer::new().render(plan)?)),
        #[cfg(not(feature = "xlsx"))]
        OutputTarget::Spreadsheet => Err(RenderError::UnsupportedTarget(
            OutputTarget::Spreadsheet.name(),
        )),
    }
}
