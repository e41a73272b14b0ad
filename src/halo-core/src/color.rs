//! RGBA colors for layer fills, strokes and trails.
//!
//! Components are normalized `f32` values so that cross-fades between trail
//! colors interpolate without rounding. Colors are read from configuration as
//! strings, either a hex value (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, the
//! `#` optional) or one of the names understood by [`Color::from_name`], and
//! serialize back as hex.
//!
//! ```
//! use halo_core::color::Color;
//!
//! let red: Color = "#FF0000".parse().unwrap();
//! let green = Color::from_rgb_u8(0, 255, 0);
//! assert!(red.lerp(green, 0.5).approx_eq(&Color::rgb(0.5, 0.5, 0.0), 0.01));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// A color with straight (non-premultiplied) alpha, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Opacity; 0.0 is invisible.
    pub a: f32,
}

impl Color {
    /// Nothing is drawn. Also the default.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::gray(0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::gray(1.0);
    /// Pure red.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Pure green.
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Pure blue.
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// Red with half green.
    pub const ORANGE: Self = Self::rgb(1.0, 0.5, 0.0);
    /// Half white.
    pub const GRAY: Self = Self::gray(0.5);
    /// One third white, the toolkit's dark gray.
    pub const DARK_GRAY: Self = Self::gray(1.0 / 3.0);
    /// Two thirds white, the toolkit's light gray.
    pub const LIGHT_GRAY: Self = Self::gray(2.0 / 3.0);

    /// Builds a color from normalized components.
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque color from normalized components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Opaque gray where every channel equals `white`.
    #[inline]
    pub const fn gray(white: f32) -> Self {
        Self::rgb(white, white, white)
    }

    /// Builds a color from 8-bit channels.
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let unit = |v: u8| f32::from(v) / 255.0;
        Self::rgba(unit(r), unit(g), unit(b), unit(a))
    }

    /// Builds an opaque color from 8-bit channels.
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, u8::MAX)
    }

    /// Channels quantized to 8 bits, clamped to the valid range.
    pub fn to_rgba_u8(&self) -> (u8, u8, u8, u8) {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (byte(self.r), byte(self.g), byte(self.b), byte(self.a))
    }

    /// Color channels quantized to 8 bits, alpha dropped.
    pub fn to_rgb_u8(&self) -> (u8, u8, u8) {
        let (r, g, b, _) = self.to_rgba_u8();
        (r, g, b)
    }

    /// Decodes `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`; the `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.is_empty() {
            return Err(ColorParseError::EmptyInput);
        }

        let nibbles = digits
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or(ColorParseError::InvalidHexChar)?;

        let bytes: Vec<u8> = match nibbles.len() {
            // short forms repeat each digit: F -> FF
            3 | 4 => nibbles.iter().map(|n| n * 17).collect(),
            6 | 8 => nibbles.chunks(2).map(|pair| pair[0] * 16 + pair[1]).collect(),
            len => return Err(ColorParseError::InvalidLength(len)),
        };

        let alpha = bytes.get(3).copied().unwrap_or(u8::MAX);
        Ok(Self::from_rgba_u8(bytes[0], bytes[1], bytes[2], alpha))
    }

    /// Encodes as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        match self.to_rgba_u8() {
            (r, g, b, u8::MAX) => format!("#{r:02X}{g:02X}{b:02X}"),
            (r, g, b, a) => format!("#{r:02X}{g:02X}{b:02X}{a:02X}"),
        }
    }

    /// Looks up a named color, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "clear" | "transparent" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "blue" => Self::BLUE,
            "orange" => Self::ORANGE,
            "gray" | "grey" => Self::GRAY,
            "darkgray" | "darkgrey" => Self::DARK_GRAY,
            "lightgray" | "lightgrey" => Self::LIGHT_GRAY,
            _ => return None,
        };
        Some(color)
    }

    /// Accepts a color name or a hex value, surrounding whitespace ignored.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ColorParseError::EmptyInput);
        }
        if let Some(color) = Self::from_name(input) {
            return Ok(color);
        }
        if input.starts_with('#') || input.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::from_hex(input);
        }
        Err(ColorParseError::UnknownColor(input.to_string()))
    }

    /// Whether drawing this color would leave no visible trace.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a < 0.001
    }

    /// Straight-line blend toward `other`; `t` is clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: f32, to: f32| from + (to - from) * t;
        Self::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Channel-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        [
            self.r - other.r,
            self.g - other.g,
            self.b - other.b,
            self.a - other.a,
        ]
        .iter()
        .all(|delta| delta.abs() < epsilon)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
