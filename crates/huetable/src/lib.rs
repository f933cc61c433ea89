//! # huetable - Color-Grouped Table Rendering
//!
//! `huetable` renders an in-memory table with rows colored by group, for the
//! terminal (24-bit ANSI), as a standalone HTML document, or as an xlsx
//! workbook. Every output shares one plan, so widths, truncation and colors
//! agree across media.
//!
//! ## Core Concepts
//!
//! - [`Table`]: ordered, equal-length named columns of [`CellValue`]s
//! - [`RenderOptions`]: group/special columns, style mode, widths, borders,
//!   pagination and output target; loadable from YAML
//! - [`prepare`]: resolves columns, selects rows, assigns colors and widths,
//!   producing a [`RenderPlan`]
//! - [`StyleResolver`]: the single rule deciding each cell's colors
//! - [`Notice`]: a substitution the planner made on the caller's behalf
//! - [`render`] / [`export`]: one-call rendering and delivery
//!
//! ## Quick Start
//!
//! ```rust
//! use huetable::{
//!     prepare, BorderStyle, CellValue, Prepared, RenderOptions, Table, TerminalRenderer,
//! };
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let table = Table::new(vec![
//!     ("Group", vec![CellValue::from("A"), CellValue::from("B"), CellValue::from("A")]),
//!     ("Value", vec![CellValue::from(1), CellValue::Missing, CellValue::from(3)]),
//! ])
//! .unwrap();
//!
//! let options = RenderOptions::new()
//!     .group_column("Group")
//!     .border_style(BorderStyle::Ascii);
//!
//! let Prepared::Ready(plan) = prepare(&table, &options, &mut StdRng::seed_from_u64(1)).unwrap()
//! else {
//!     unreachable!()
//! };
//! let text = TerminalRenderer::new().ansi(false).render(&plan);
//! assert!(text.starts_with("+-------+-------+"));
//! assert!(text.contains("| B     | N/A   |"));
//! ```
//!
//! ## Pagination
//!
//! Rows can be paged with `page_size`/`current_page`, or filtered to a set of
//! group values with `group_pagination`. A group filter that matches nothing
//! yields [`Prepared::Empty`] with the requested and available groups rather
//! than an error.
//!
//! ## Logging
//!
//! Notices and plan decisions are emitted as `tracing` events. The crate
//! installs no subscriber.

mod border;
mod color;
mod error;
mod export;
mod group;
mod layout;
mod notice;
mod options;
mod plan;
pub mod render;
mod style;
mod table;
mod util;
mod value;
mod view;

pub use border::{BorderChars, BorderStyle, LineType};
pub use color::{contrasting_color, generate_color, Palette, Rgb, CHANNEL_MAX, CHANNEL_MIN};
pub use error::{OptionsError, RenderError, TableError};
pub use export::{export, is_contention, ContentionPrompt, ExportOutcome, TermPrompt};
pub use group::GroupKey;
pub use layout::{
    choose_group_column, compute_widths, resolve_columns, ColumnResolution, LayoutPlan,
};
pub use notice::{Notice, NoticeLevel};
pub use options::{
    GroupSelection, OutputTarget, RenderOptions, DEFAULT_MAX_COLUMN_WIDTH,
    DEFAULT_NULL_PLACEHOLDER, DEFAULT_SEPARATOR,
};
pub use plan::{prepare, PlannedCell, Prepared, RenderPlan};
pub use render::{render, render_plan, HtmlRenderer, RenderOutcome, RenderOutput, TerminalRenderer};
#[cfg(feature = "xlsx")]
pub use render::XlsxRenderer;
pub use style::{CellStyle, SpecialHighlight, StyleMode, StyleResolver};
pub use table::{Column, Table};
pub use util::{display_width, pad_right};
pub use value::{format_value, truncate, CellValue, ELLIPSIS};
pub use view::{select_view, EmptySelection, Selection, ViewSlice, ViewSummary};
