//! Cell values and their display form.
//!
//! A [`CellValue`] is the closed set of things a table cell can hold: a number,
//! a piece of text, a nested list, or nothing at all. Every renderer goes
//! through [`format_value`] to turn a value into text and through [`truncate`]
//! to fit that text into a column.

use std::cmp::Ordering;
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::util::{display_width, take_width};

/// Suffix appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// A single table cell.
///
/// Values have total equality and ordering so they can key color palettes and
/// be sorted for display. Variants order as `Missing < Number < Text < List`;
/// numbers compare by value with `-0.0` folded into `0.0`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value. NaN numbers are folded into this variant.
    #[default]
    Missing,
    Number(f64),
    Text(String),
    List(Vec<CellValue>),
}

impl CellValue {
    /// Returns true for [`CellValue::Missing`] and for NaN numbers that have
    /// not been normalized yet.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Folds NaN numbers into `Missing`, recursively.
    pub fn normalized(self) -> Self {
        match self {
            CellValue::Number(n) if n.is_nan() => CellValue::Missing,
            CellValue::List(items) => {
                CellValue::List(items.into_iter().map(CellValue::normalized).collect())
            }
            other => other,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Missing => 0,
            CellValue::Number(_) => 1,
            CellValue::Text(_) => 2,
            CellValue::List(_) => 3,
        }
    }

    /// Literal representation used for nested lists: `[1, "a", null]`.
    pub fn literal(&self) -> String {
        let mut out = String::new();
        write_literal(self, &mut out);
        out
    }
}

fn fold_zero(n: f64) -> f64 {
    if n == 0.0 {
        0.0
    } else {
        n
    }
}

fn write_literal(value: &CellValue, out: &mut String) {
    match value {
        CellValue::Missing => out.push_str("null"),
        CellValue::Number(n) if n.is_nan() => out.push_str("null"),
        CellValue::Number(n) => {
            let _ = write!(out, "{}", fold_zero(*n));
        }
        CellValue::Text(s) => {
            let _ = write!(out, "{:?}", s);
        }
        CellValue::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_literal(item, out);
            }
            out.push(']');
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        // NaN sorts with Missing so that both forms of "no value" stay equal
        match (self.is_missing(), other.is_missing()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => fold_zero(*a).total_cmp(&fold_zero(*b)),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::List(a), CellValue::List(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_missing() {
            0u8.hash(state);
            return;
        }
        self.rank().hash(state);
        match self {
            CellValue::Number(n) => fold_zero(*n).to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
            CellValue::List(items) => items.hash(state),
            CellValue::Missing => {}
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        if n.is_nan() {
            CellValue::Missing
        } else {
            CellValue::Number(n)
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellValue {
                fn from(n: $t) -> Self {
                    CellValue::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_int!(i32, i64, u32, u64, usize);

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Text(b.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Missing, Into::into)
    }
}

impl<T: Into<CellValue>> From<Vec<T>> for CellValue {
    fn from(items: Vec<T>) -> Self {
        CellValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CellValue::Missing,
            Value::Bool(b) => CellValue::from(*b),
            Value::Number(n) => n.as_f64().map_or(CellValue::Missing, CellValue::from),
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(items) => CellValue::List(items.iter().map(CellValue::from).collect()),
            Value::Object(_) => CellValue::Text(value.to_string()),
        }
    }
}

/// Renders a cell value to display text.
///
/// Missing values become `placeholder`. Lists render as their literal form
/// rather than a summary, so `[1, 2]` stays distinguishable from the text
/// `"1, 2"`.
///
/// # Example
///
/// ```rust
/// use huetable::{format_value, CellValue};
///
/// assert_eq!(format_value(&CellValue::Missing, "N/A"), "N/A");
/// assert_eq!(format_value(&CellValue::from(4.5), "N/A"), "4.5");
/// assert_eq!(format_value(&CellValue::from(vec![1, 2]), "N/A"), "[1, 2]");
/// ```
pub fn format_value(value: &CellValue, placeholder: &str) -> String {
    if value.is_missing() {
        return placeholder.to_string();
    }
    match value {
        CellValue::Number(n) => fold_zero(*n).to_string(),
        CellValue::Text(s) => s.clone(),
        CellValue::List(_) => value.literal(),
        CellValue::Missing => placeholder.to_string(),
    }
}

/// Truncates `text` to at most `max_len` display columns.
///
/// Text that fits is returned unchanged. Longer text keeps its longest
/// prefix of width `max_len - 3` followed by `"..."`. When `max_len` is
/// below 3 there is no room for the ellipsis and the plain prefix is
/// returned instead.
///
/// # Example
///
/// ```rust
/// use huetable::truncate;
///
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("This is a long text", 10), "This is...");
/// assert_eq!(truncate("abcdef", 2), "ab");
/// ```
pub fn truncate(text: &str, max_len: usize) -> String {
    if display_width(text) <= max_len {
        return text.to_string();
    }
    if max_len < ELLIPSIS.len() {
        return take_width(text, max_len);
    }
    let mut out = take_width(text, max_len - ELLIPSIS.len());
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_format_missing_uses_placeholder() {
        assert_eq!(format_value(&CellValue::Missing, "<NULL>"), "<NULL>");
        assert_eq!(format_value(&CellValue::Number(f64::NAN), "-"), "-");
    }

    #[test]
    fn test_format_numbers() {
        assert_eq!(format_value(&CellValue::from(42), "N/A"), "42");
        assert_eq!(format_value(&CellValue::from(3.0), "N/A"), "3");
        assert_eq!(format_value(&CellValue::from(-0.0), "N/A"), "0");
        assert_eq!(format_value(&CellValue::from(4.25), "N/A"), "4.25");
    }

    #[test]
    fn test_format_list_is_literal() {
        let v = CellValue::List(vec![
            CellValue::from(1),
            CellValue::from("a"),
            CellValue::Missing,
            CellValue::from(vec!["x"]),
        ]);
        assert_eq!(format_value(&v, "N/A"), r#"[1, "a", null, ["x"]]"#);
    }

    #[test]
    fn test_from_f64_nan_is_missing() {
        assert_eq!(CellValue::from(f64::NAN), CellValue::Missing);
        assert_eq!(CellValue::Number(f64::NAN).normalized(), CellValue::Missing);
    }

    #[test]
    fn test_from_json() {
        let v = serde_json::json!([null, true, 2, "x"]);
        assert_eq!(
            CellValue::from(&v),
            CellValue::List(vec![
                CellValue::Missing,
                CellValue::from("true"),
                CellValue::from(2),
                CellValue::from("x"),
            ])
        );
    }

    #[test]
    fn test_equality_and_hash_fold_zero() {
        let mut set = HashSet::new();
        set.insert(CellValue::from(0.0));
        set.insert(CellValue::from(-0.0));
        set.insert(CellValue::Missing);
        set.insert(CellValue::Number(f64::NAN));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_ordering_across_variants() {
        let mut values = vec![
            CellValue::from("b"),
            CellValue::from(vec![1]),
            CellValue::from(10),
            CellValue::Missing,
            CellValue::from(2),
            CellValue::from("a"),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                CellValue::Missing,
                CellValue::from(2),
                CellValue::from(10),
                CellValue::from("a"),
                CellValue::from("b"),
                CellValue::from(vec![1]),
            ]
        );
    }

    #[test]
    fn test_truncate_fits() {
        assert_eq!(truncate("Hello", 5), "Hello");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate("123456", 5), "12...");
        assert_eq!(truncate("abcd", 3), "...");
    }

    #[test]
    fn test_truncate_below_ellipsis_width() {
        assert_eq!(truncate("abcdef", 2), "ab");
        assert_eq!(truncate("abcdef", 1), "a");
        assert_eq!(truncate("abcdef", 0), "");
    }

    #[test]
    fn test_deserialize_untagged() {
        let v: Vec<CellValue> = serde_yaml::from_str("[A, 3, null, [1, 2]]").unwrap();
        assert_eq!(
            v,
            vec![
                CellValue::from("A"),
                CellValue::from(3),
                CellValue::Missing,
                CellValue::from(vec![1, 2]),
            ]
        );
    }

    proptest! {
        #[test]
        fn truncate_is_identity_when_text_fits(s in "[a-zA-Z0-9 ]{0,30}", extra in 0usize..10) {
            let n = s.len() + extra;
            prop_assert_eq!(truncate(&s, n), s.clone());
            prop_assert_eq!(truncate(&truncate(&s, n), n), s);
        }

        #[test]
        fn truncate_hits_exact_length_with_ellipsis(s in "[a-zA-Z0-9 ]{4,40}", n in 3usize..40) {
            prop_assume!(s.len() > n);
            let out = truncate(&s, n);
            prop_assert_eq!(out.chars().count(), n);
            prop_assert!(out.ends_with(ELLIPSIS));
        }
    }
}
