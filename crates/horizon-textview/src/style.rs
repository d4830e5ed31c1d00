//! Visual style values forwarded to the native control.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An RGBA color with straight (non-premultiplied) alpha.
///
/// Colors serialize as `#RRGGBB` or `#RRGGBBAA`, so each channel is rounded
/// to the nearest multiple of 1/255 on the way through a config file. The
/// named constants are all exact 8-bit values and survive unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components (0.0-1.0 range).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from 8-bit RGBA components (0-255 range).
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "#FF0000FF").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let len = hex.len();

        if (len != 6 && len != 8) || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if len == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self::from_rgba8(r, g, b, a))
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Convert to 8-bit components.
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }

    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    /// `#808080`.
    pub const GRAY: Self = Self::from_rgb(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color `{hex}`")))
    }
}

/// A font family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontFamily {
    /// The platform's default sans-serif family.
    #[default]
    SansSerif,
    /// The platform's default serif family.
    Serif,
    /// The platform's default monospace family.
    Monospace,
    /// A specific family by name.
    Name(String),
}

impl From<String> for FontFamily {
    fn from(name: String) -> Self {
        match name.as_str() {
            "sans-serif" => Self::SansSerif,
            "serif" => Self::Serif,
            "monospace" => Self::Monospace,
            _ => Self::Name(name),
        }
    }
}

impl From<FontFamily> for String {
    fn from(family: FontFamily) -> Self {
        family.to_string()
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SansSerif => f.write_str("sans-serif"),
            Self::Serif => f.write_str("serif"),
            Self::Monospace => f.write_str("monospace"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Font weight on the CSS 100-900 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const LIGHT: Self = Self(300);
    pub const NORMAL: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const BOLD: Self = Self(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// A font specification handed to the native control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: FontFamily,
    /// Size in points.
    pub size: f32,
    #[serde(default)]
    pub weight: FontWeight,
}

impl Font {
    /// Create a regular-weight font.
    pub fn new(family: FontFamily, size: f32) -> Self {
        Self {
            family,
            size,
            weight: FontWeight::NORMAL,
        }
    }

    /// Set the weight using builder pattern.
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }
}

/// Horizontal text alignment inside the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    /// Follow the writing direction of the text.
    #[default]
    Natural,
    Left,
    Center,
    Right,
    Justified,
}

/// Where the placeholder sits inside the text view's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderAlignment {
    #[default]
    TopLeading,
    Top,
    TopTrailing,
    Leading,
    Center,
    Trailing,
    BottomLeading,
    Bottom,
    BottomTrailing,
}

impl PlaceholderAlignment {
    /// Horizontal fraction of free space placed before the content.
    pub fn horizontal_factor(self) -> f32 {
        match self {
            Self::TopLeading | Self::Leading | Self::BottomLeading => 0.0,
            Self::Top | Self::Center | Self::Bottom => 0.5,
            Self::TopTrailing | Self::Trailing | Self::BottomTrailing => 1.0,
        }
    }

    /// Vertical fraction of free space placed above the content.
    pub fn vertical_factor(self) -> f32 {
        match self {
            Self::TopLeading | Self::Top | Self::TopTrailing => 0.0,
            Self::Leading | Self::Center | Self::Trailing => 0.5,
            Self::BottomLeading | Self::Bottom | Self::BottomTrailing => 1.0,
        }
    }
}

/// Requested autocorrection behavior.
///
/// Controls that only expose an on/off switch treat `Default` like `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Autocorrection {
    #[default]
    Default,
    Yes,
    No,
}

impl Autocorrection {
    /// The on/off state this mode maps to on the native control.
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Placeholder inset from the edges of the text view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Padding {
    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::new(5.0, 8.0)
    }
}
