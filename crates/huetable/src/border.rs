//! Border glyph sets for the terminal renderer.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Border style for terminal tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    /// No borders; cells are joined with the configured separator.
    #[default]
    None,
    /// ASCII borders: +, -, |
    Ascii,
    /// Light box-drawing characters: ┌, ─, ┐, │, └, ┘, ├, ┼, ┤, ┬, ┴
    Unicode,
    /// Heavy box-drawing characters: ┏, ━, ┓, ┃, ┗, ┛, ┣, ╋, ┫, ┳, ┻
    UnicodeHeavy,
}

impl BorderStyle {
    /// Glyphs for this style, or `None` when borders are disabled.
    pub fn chars(&self) -> Option<BorderChars> {
        match self {
            BorderStyle::None => None,
            BorderStyle::Ascii => Some(BorderChars {
                horizontal: '-',
                vertical: '|',
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                left_t: '+',
                cross: '+',
                right_t: '+',
                top_t: '+',
                bottom_t: '+',
            }),
            BorderStyle::Unicode => Some(BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                left_t: '├',
                cross: '┼',
                right_t: '┤',
                top_t: '┬',
                bottom_t: '┴',
            }),
            BorderStyle::UnicodeHeavy => Some(BorderChars {
                horizontal: '━',
                vertical: '┃',
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
                left_t: '┣',
                cross: '╋',
                right_t: '┫',
                top_t: '┳',
                bottom_t: '┻',
            }),
        }
    }
}

impl FromStr for BorderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(BorderStyle::None),
            "ascii" => Ok(BorderStyle::Ascii),
            "unicode" => Ok(BorderStyle::Unicode),
            "unicode_heavy" | "unicode-heavy" => Ok(BorderStyle::UnicodeHeavy),
            other => Err(format!("unknown border style: {}", other)),
        }
    }
}

/// Box-drawing characters for a border style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub left_t: char,
    pub cross: char,
    pub right_t: char,
    pub top_t: char,
    pub bottom_t: char,
}

/// Which horizontal rule to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineType {
    Top,
    /// Between the header and the first data row.
    Middle,
    Bottom,
}

impl BorderChars {
    /// Draws a horizontal rule spanning columns of the given widths.
    ///
    /// Each column gets `width + 2` horizontal glyphs to cover the padding
    /// space on either side of the cell text.
    pub fn line(&self, widths: &[usize], line: LineType) -> String {
        let (left, mid, right) = match line {
            LineType::Top => (self.top_left, self.top_t, self.top_right),
            LineType::Middle => (self.left_t, self.cross, self.right_t),
            LineType::Bottom => (self.bottom_left, self.bottom_t, self.bottom_right),
        };

        let mut out = String::new();
        out.push(left);
        for (i, width) in widths.iter().enumerate() {
            out.extend(std::iter::repeat_n(self.horizontal, width + 2));
            out.push(if i + 1 < widths.len() { mid } else { right });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_has_no_glyphs() {
        assert!(BorderStyle::None.chars().is_none());
    }

    #[test]
    fn test_ascii_lines() {
        let chars = BorderStyle::Ascii.chars().unwrap();
        assert_eq!(chars.line(&[2, 3], LineType::Top), "+----+-----+");
        assert_eq!(chars.line(&[1], LineType::Middle), "+---+");
    }

    #[test]
    fn test_unicode_lines() {
        let chars = BorderStyle::Unicode.chars().unwrap();
        assert_eq!(chars.line(&[1, 1], LineType::Top), "┌───┬───┐");
        assert_eq!(chars.line(&[1, 1], LineType::Middle), "├───┼───┤");
        assert_eq!(chars.line(&[1, 1], LineType::Bottom), "└───┴───┘");
    }

    #[test]
    fn test_heavy_lines() {
        let chars = BorderStyle::UnicodeHeavy.chars().unwrap();
        assert_eq!(chars.line(&[0], LineType::Bottom), "┗━━┛");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("unicode-heavy".parse::<BorderStyle>(), Ok(BorderStyle::UnicodeHeavy));
        assert_eq!("ascii".parse::<BorderStyle>(), Ok(BorderStyle::Ascii));
        assert!("double".parse::<BorderStyle>().is_err());
    }

    #[test]
    fn test_deserialize_names() {
        let style: BorderStyle = serde_yaml::from_str("unicode_heavy").unwrap();
        assert_eq!(style, BorderStyle::UnicodeHeavy);
    }
}
