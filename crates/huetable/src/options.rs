//! Render configuration.
//!
//! [`RenderOptions`] can be built in code with chained setters or loaded from
//! YAML. Every field has a default, so a YAML document only needs the keys it
//! changes:
//!
//! ```rust
//! use huetable::{BorderStyle, RenderOptions, StyleMode};
//!
//! let options = RenderOptions::from_yaml(r#"
//! group_column: Group
//! special_column: special_col
//! style_mode: text
//! border_style: unicode
//! page_size: 5
//! current_page: 2
//! "#).unwrap();
//!
//! assert_eq!(options.group_columns, vec!["Group".to_string()]);
//! assert_eq!(options.style_mode, StyleMode::Text);
//! assert_eq!(options.border_style, BorderStyle::Unicode);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::border::BorderStyle;
use crate::error::OptionsError;
use crate::style::StyleMode;
use crate::value::CellValue;

/// Default cap on any column's width.
pub const DEFAULT_MAX_COLUMN_WIDTH: usize = 20;
/// Default text between columns when borders are off.
pub const DEFAULT_SEPARATOR: &str = "  ";
/// Default text shown for missing values.
pub const DEFAULT_NULL_PLACEHOLDER: &str = "N/A";

/// Which renderer to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTarget {
    /// 24-bit ANSI text.
    #[default]
    Terminal,
    /// A standalone HTML document.
    Markup,
    /// An xlsx workbook.
    Spreadsheet,
}

impl OutputTarget {
    pub fn name(&self) -> &'static str {
        match self {
            OutputTarget::Terminal => "terminal",
            OutputTarget::Markup => "markup",
            OutputTarget::Spreadsheet => "spreadsheet",
        }
    }

    /// Whether the target can color by a tuple of group columns.
    pub fn supports_multi_group(&self) -> bool {
        matches!(self, OutputTarget::Spreadsheet)
    }

    /// File name used by [`export`](crate::export) when no path is configured.
    pub fn default_file_name(&self) -> Option<&'static str> {
        match self {
            OutputTarget::Terminal => None,
            OutputTarget::Markup => Some("table.html"),
            OutputTarget::Spreadsheet => Some("table.xlsx"),
        }
    }
}

/// Group values to show when paginating by group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupSelection {
    Many(Vec<CellValue>),
    One(CellValue),
}

impl GroupSelection {
    /// The requested values, in the order given.
    pub fn values(&self) -> Vec<CellValue> {
        match self {
            GroupSelection::Many(values) => values.clone(),
            GroupSelection::One(value) => vec![value.clone()],
        }
    }
}

impl From<&str> for GroupSelection {
    fn from(value: &str) -> Self {
        GroupSelection::One(CellValue::from(value))
    }
}

impl From<CellValue> for GroupSelection {
    fn from(value: CellValue) -> Self {
        GroupSelection::One(value)
    }
}

impl<T: Into<CellValue>> From<Vec<T>> for GroupSelection {
    fn from(values: Vec<T>) -> Self {
        GroupSelection::Many(values.into_iter().map(Into::into).collect())
    }
}

/// Display options for one render call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Grouping key column(s). Empty means auto-select.
    #[serde(alias = "group_column", deserialize_with = "one_or_many")]
    pub group_columns: Vec<String>,
    /// Column whose values override the group color.
    pub special_column: Option<String>,
    pub style_mode: StyleMode,
    /// Extend special coloring to every column after the special column.
    pub persist_special_color: bool,
    pub max_column_width: usize,
    /// Multiplier applied to natural column widths before the cap.
    pub width_scale: f64,
    pub separator: String,
    pub border_style: BorderStyle,
    pub null_placeholder: String,
    pub page_size: Option<usize>,
    pub current_page: usize,
    /// Paginate by group values instead of rows. Takes precedence over
    /// `page_size`.
    pub group_pagination: Option<GroupSelection>,
    pub output: OutputTarget,
    pub output_path: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            group_columns: Vec::new(),
            special_column: None,
            style_mode: StyleMode::Background,
            persist_special_color: false,
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            width_scale: 1.0,
            separator: DEFAULT_SEPARATOR.to_string(),
            border_style: BorderStyle::None,
            null_placeholder: DEFAULT_NULL_PLACEHOLDER.to_string(),
            page_size: None,
            current_page: 1,
            group_pagination: None,
            output: OutputTarget::Terminal,
            output_path: None,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates options from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, OptionsError> {
        let options: RenderOptions = serde_yaml::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    /// Rejects values no render can work with.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.page_size == Some(0) {
            return Err(OptionsError::ZeroPageSize);
        }
        if !(self.width_scale.is_finite() && self.width_scale > 0.0) {
            return Err(OptionsError::InvalidWidthScale(self.width_scale));
        }
        Ok(())
    }

    /// Sets a single group column, replacing any previous ones.
    pub fn group_column(mut self, name: impl Into<String>) -> Self {
        self.group_columns = vec![name.into()];
        self
    }

    /// Sets an ordered set of group columns (spreadsheet output).
    pub fn group_columns<S: Into<String>, I: IntoIterator<Item = S>>(mut self, names: I) -> Self {
        self.group_columns = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn special_column(mut self, name: impl Into<String>) -> Self {
        self.special_column = Some(name.into());
        self
    }

    pub fn style_mode(mut self, mode: StyleMode) -> Self {
        self.style_mode = mode;
        self
    }

    pub fn persist_special_color(mut self, persist: bool) -> Self {
        self.persist_special_color = persist;
        self
    }

    pub fn max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width;
        self
    }

    pub fn width_scale(mut self, scale: f64) -> Self {
        self.width_scale = scale;
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn border_style(mut self, border: BorderStyle) -> Self {
        self.border_style = border;
        self
    }

    pub fn null_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.null_placeholder = placeholder.into();
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn current_page(mut self, page: usize) -> Self {
        self.current_page = page;
        self
    }

    pub fn group_pagination(mut self, selection: impl Into<GroupSelection>) -> Self {
        self.group_pagination = Some(selection.into());
        self
    }

    pub fn output(mut self, target: OutputTarget) -> Self {
        self.output = target;
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(name)) => vec![name],
        Some(OneOrMany::Many(names)) => names,
    })
}
