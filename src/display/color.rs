//! Straight-alpha RGBA colors

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 8-bit per channel RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from normalized channels, clamping each to [0, 1]
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgba(channel(r), channel(g), channel(b), channel(a))
    }

    /// Normalized (r, g, b, a)
    pub fn to_f32(self) -> (f32, f32, f32, f32) {
        let channel = |v: u8| f32::from(v) / 255.0;
        (channel(self.r), channel(self.g), channel(self.b), channel(self.a))
    }

    /// BGRA byte order as stored in the pixel buffer
    #[inline]
    pub const fn to_bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    #[inline]
    pub const fn from_bgra(bytes: [u8; 4]) -> Self {
        Self::rgba(bytes[2], bytes[1], bytes[0], bytes[3])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Error for color strings that are not `#rrggbb` / `#rrggbbaa`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}' (expected #rrggbb or #rrggbbaa)")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// HSV to RGB color conversion
/// h: 0-360, s: 0-1, v: 0-1
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Color {
    let c = v * s;
    let h_prime = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r1, g1, b1) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Color::from_f32(r1 + m, g1 + m, b1 + m, 1.0)
}

/// Evenly spaced hues for the shell's color cycling
pub fn make_palette(size: usize) -> Vec<Color> {
    (0..size)
        .map(|i| {
            let t = i as f32 / size as f32;
            hsv_to_rgb(t * 360.0, 0.85, 0.9)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f32_clamps() {
        let c = Color::from_f32(1.5, -0.2, 0.5, 1.0);
        assert_eq!(c, Color::rgba(255, 0, 128, 255));
    }

    #[test]
    fn test_bgra_round_trip() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(c.to_bgra(), [3, 2, 1, 4]);
        assert_eq!(Color::from_bgra(c.to_bgra()), c);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#ff8800".parse::<Color>().unwrap(), Color::rgb(255, 136, 0));
        assert_eq!("#00000080".parse::<Color>().unwrap(), Color::rgba(0, 0, 0, 128));
        assert!("ff8800".parse::<Color>().is_err());
        assert!("#ff88".parse::<Color>().is_err());
        assert!("#gg8800".parse::<Color>().is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::BLUE).unwrap();
        assert_eq!(json, "\"#0000ff\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::BLUE);
    }

    #[test]
    fn test_palette_is_opaque_and_distinct() {
        let palette = make_palette(6);
        assert_eq!(palette.len(), 6);
        assert!(palette.iter().all(|c| c.a == 255));
        assert_ne!(palette[0], palette[3]);
    }
}
