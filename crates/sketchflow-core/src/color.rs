//! Color handling for Sketchflow diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, providing convenience methods for working with colors
//! in node fills, borders, labels and edge strokes.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Wrapper around the `DynamicColor` type from the color crate.
///
/// Colors keep the exact string they were parsed from, so a fill written as
/// `#3b82f6` is serialized back as `#3b82f6` rather than in a normalized form.
#[derive(Clone, Debug)]
pub struct Color {
    color: DynamicColor,
    source: Option<Box<str>>,
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.color.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchflow_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert_eq!(red.to_string(), "#ff0000");
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let trimmed = color_str.trim();
        match DynamicColor::from_str(trimmed) {
            Ok(color) => Ok(Self {
                color,
                source: Some(trimmed.into()),
            }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns a sanitized, ID-safe string representation of this color.
    ///
    /// Converts the color to a string suitable for use as an SVG ID attribute
    /// (e.g., in marker definitions). The result contains only alphanumeric
    /// characters and underscores, with a letter prefix guaranteed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchflow_core::color::Color;
    ///
    /// let color = Color::new("#ff8000").unwrap();
    /// let id_str = color.to_id_safe_string();
    /// assert!(id_str.chars().all(|c| c.is_alphanumeric() || c == '_'));
    /// assert!(!id_str.contains('#'));
    /// ```
    pub fn to_id_safe_string(&self) -> String {
        let color_str = self.to_string();
        let mut sanitized = color_str
            .replace('#', "hex")
            .replace(['(', ')', ',', ' ', ';', '.', '%', '/'], "_");

        // SVG ids must start with a letter
        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized = format!("c_{sanitized}");
        }

        sanitized
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchflow_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(&self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
            source: None,
        }
    }

    /// Returns the alpha (transparency) component of this color, between
    /// 0.0 (fully transparent) and 1.0 (fully opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns `true` when the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.alpha() <= f32::EPSILON
    }

    /// Returns the color as 8-bit sRGB channels.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }

    /// Picks black or white text for legibility on top of this color.
    ///
    /// Uses the YIQ perceived brightness formula; backgrounds brighter than
    /// 128 get black text. Fully transparent backgrounds get black text.
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchflow_core::color::Color;
    ///
    /// let yellow = Color::new("#fbbf24").unwrap();
    /// assert_eq!(yellow.contrasting_text().to_string(), "#000000");
    ///
    /// let navy = Color::new("#1e3a8a").unwrap();
    /// assert_eq!(navy.contrasting_text().to_string(), "#ffffff");
    /// ```
    pub fn contrasting_text(&self) -> Color {
        if self.is_transparent() {
            return Self::black();
        }
        let [r, g, b, _] = self.to_rgba8();
        let brightness = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
        if brightness > 128 {
            Self::black()
        } else {
            Self::white()
        }
    }

    fn black() -> Self {
        Self::new("#000000").expect("'#000000' is a valid CSS color")
    }

    fn white() -> Self {
        Self::new("#ffffff").expect("'#ffffff' is a valid CSS color")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => f.write_str(source),
            None => write!(f, "{}", self.color),
        }
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::new(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert!(red.is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
    }

    #[test]
    fn test_color_keeps_source_spelling() {
        let color = Color::new("#6366f1").unwrap();
        assert_eq!(color.to_string(), "#6366f1");

        let transparent = Color::new("transparent").unwrap();
        assert_eq!(transparent.to_string(), "transparent");
        assert!(transparent.is_transparent());
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap();
        let transparent = color.with_alpha(0.5);
        assert!((transparent.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_to_id_safe_string() {
        let color = Color::new("#ff0000").unwrap();
        let safe_id = color.to_id_safe_string();
        assert_eq!(safe_id, "hexff0000");

        let rgb = Color::new("rgb(1, 2, 3)").unwrap();
        let safe_id = rgb.to_id_safe_string();
        assert!(safe_id.chars().all(|c| c.is_alphanumeric() || c == '_'));
    }

    #[test]
    fn test_color_to_rgba8() {
        let color = Color::new("#3b82f6").unwrap();
        assert_eq!(color.to_rgba8(), [0x3b, 0x82, 0xf6, 0xff]);
    }

    #[test]
    fn test_contrasting_text() {
        let white_bg = Color::new("#ffffff").unwrap();
        assert_eq!(white_bg.contrasting_text().to_string(), "#000000");

        let black_bg = Color::new("#000000").unwrap();
        assert_eq!(black_bg.contrasting_text().to_string(), "#ffffff");

        let transparent = Color::new("transparent").unwrap();
        assert_eq!(transparent.contrasting_text().to_string(), "#000000");
    }

    #[test]
    fn test_color_serde_roundtrip() {
        let color = Color::new("#10b981").unwrap();
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#10b981\"");

        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);

        let invalid: Result<Color, _> = serde_json::from_str("\"nope\"");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
