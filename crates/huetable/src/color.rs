//! Group colors and readable text colors.
//!
//! Every distinct group value gets a random mid-bright color for the duration
//! of one render call. Text drawn on top of such a color is black or white,
//! picked by BT.601 luma.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use rand::Rng;

/// Lowest channel value handed out by [`generate_color`].
pub const CHANNEL_MIN: u8 = 50;
/// Highest channel value handed out by [`generate_color`].
pub const CHANNEL_MAX: u8 = 200;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Perceived brightness, `0.299 R + 0.587 G + 0.114 B`.
    pub fn luma(self) -> f64 {
        f64::from(self.weighted_sum()) / 1000.0
    }

    // 1000 * luma, exact in integers
    fn weighted_sum(self) -> u32 {
        299 * u32::from(self.0) + 587 * u32::from(self.1) + 114 * u32::from(self.2)
    }

    /// Packs the color as `0xRRGGBB`.
    pub fn to_u32(self) -> u32 {
        (u32::from(self.0) << 16) | (u32::from(self.1) << 8) | u32::from(self.2)
    }

    /// 24-bit ANSI escape selecting this color as foreground.
    pub fn ansi_fg(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.0, self.1, self.2)
    }

    /// 24-bit ANSI escape selecting this color as background.
    pub fn ansi_bg(self) -> String {
        format!("\x1b[48;2;{};{};{}m", self.0, self.1, self.2)
    }
}

/// Formats as a CSS hex color, `#rrggbb`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Draws a color with each channel uniform in `[50, 200]`.
///
/// The range avoids near-black and near-white colors so both black and white
/// text stay legible on top.
pub fn generate_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb(
        rng.random_range(CHANNEL_MIN..=CHANNEL_MAX),
        rng.random_range(CHANNEL_MIN..=CHANNEL_MAX),
        rng.random_range(CHANNEL_MIN..=CHANNEL_MAX),
    )
}

/// Black for bright colors (luma above 125), white otherwise.
///
/// # Example
///
/// ```rust
/// use huetable::{contrasting_color, Rgb};
///
/// assert_eq!(contrasting_color(Rgb(200, 200, 200)), Rgb::BLACK);
/// assert_eq!(contrasting_color(Rgb(50, 50, 50)), Rgb::WHITE);
/// ```
pub fn contrasting_color(rgb: Rgb) -> Rgb {
    if rgb.weighted_sum() > 125_000 {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

/// Colors keyed by distinct values.
#[derive(Clone, Debug)]
pub struct Palette<K> {
    colors: HashMap<K, Rgb>,
}

impl<K: Eq + Hash> Palette<K> {
    /// Assigns a fresh color to each distinct key, in iteration order.
    ///
    /// Repeated keys keep the color of their first occurrence.
    pub fn generate<I, R>(keys: I, rng: &mut R) -> Self
    where
        I: IntoIterator<Item = K>,
        R: Rng + ?Sized,
    {
        let mut colors = HashMap::new();
        for key in keys {
            colors.entry(key).or_insert_with(|| generate_color(rng));
        }
        Palette { colors }
    }

    pub fn get(&self, key: &K) -> Option<Rgb> {
        self.colors.get(key).copied()
    }

    pub fn insert(&mut self, key: K, color: Rgb) {
        self.colors.insert(key, color);
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl<K: Eq + Hash> FromIterator<(K, Rgb)> for Palette<K> {
    fn from_iter<I: IntoIterator<Item = (K, Rgb)>>(iter: I) -> Self {
        Palette {
            colors: iter.into_iter().collect(),
        }
    }
}
