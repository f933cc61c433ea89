//! Operator-facing messages about substitutions made while planning a render.

use std::fmt;

/// Severity of a [`Notice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Something the planner decided on the caller's behalf.
///
/// Notices never stop a render. They are returned with the plan and logged
/// through `tracing` when the plan is prepared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// No group column was requested and one was picked automatically.
    AutoSelectedGroup { column: String, distinct: usize },
    /// No column qualified for grouping; rows are grouped by row number.
    NoGroupCandidate { fallback: String },
    /// A requested group column does not exist; rows are grouped by row number.
    MissingGroupColumn { requested: String, fallback: String },
    /// A requested group column does not exist but other group columns do.
    UnknownGroupColumnDropped { requested: String },
    /// The renderer groups by one column only; the rest were ignored.
    ExtraGroupColumnsIgnored { used: String, ignored: Vec<String> },
    /// The requested special column does not exist; highlighting is off.
    MissingSpecialColumn { requested: String },
}

impl Notice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            Notice::AutoSelectedGroup { .. } => NoticeLevel::Info,
            _ => NoticeLevel::Warning,
        }
    }

    /// Logs the notice at a level matching its severity.
    pub fn emit(&self) {
        match self.level() {
            NoticeLevel::Info => tracing::info!(notice = %self, "render plan adjusted"),
            NoticeLevel::Warning => tracing::warn!(notice = %self, "render plan adjusted"),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::AutoSelectedGroup { column, distinct } => write!(
                f,
                "Auto-selected '{}' as group column (fewest unique values: {})",
                column, distinct
            ),
            Notice::NoGroupCandidate { fallback } => write!(
                f,
                "Warning: couldn't find a suitable grouping column. Using '{}' instead.",
                fallback
            ),
            Notice::MissingGroupColumn {
                requested,
                fallback,
            } => write!(
                f,
                "Warning: group column '{}' not found in table. Using '{}' instead.",
                requested, fallback
            ),
            Notice::UnknownGroupColumnDropped { requested } => write!(
                f,
                "Warning: group column '{}' not found in table. Ignoring it.",
                requested
            ),
            Notice::ExtraGroupColumnsIgnored { used, ignored } => write!(
                f,
                "Warning: this output groups by a single column. Using '{}', ignoring {}.",
                used,
                ignored
                    .iter()
                    .map(|c| format!("'{}'", c))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Notice::MissingSpecialColumn { requested } => write!(
                f,
                "Warning: special column '{}' not found in table. \
                 Not applying special highlighting.",
                requested
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let info = Notice::AutoSelectedGroup {
            column: "Group".into(),
            distinct: 3,
        };
        assert_eq!(info.level(), NoticeLevel::Info);
        let warn = Notice::MissingSpecialColumn {
            requested: "x".into(),
        };
        assert_eq!(warn.level(), NoticeLevel::Warning);
    }

    #[test]
    fn test_display_names_substitution() {
        let notice = Notice::MissingGroupColumn {
            requested: "Team".into(),
            fallback: "index".into(),
        };
        assert_eq!(
            notice.to_string(),
            "Warning: group column 'Team' not found in table. Using 'index' instead."
        );
    }

    #[test]
    fn test_display_ignored_columns() {
        let notice = Notice::ExtraGroupColumnsIgnored {
            used: "a".into(),
            ignored: vec!["b".into(), "c".into()],
        };
        assert!(notice.to_string().ends_with("Using 'a', ignoring 'b', 'c'."));
    }
}
