use serde::{Deserialize, Serialize};

use crate::{AirBarError, Vec2};

/// RGBA color. In config files it is written as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(r, g, b, a)
    }

    /// Lenient hex parsing for literals in code; malformed input falls back
    /// to opaque black. Use [`Color::parse_hex`] for untrusted input.
    pub fn from_hex(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or(Color::BLACK)
    }

    pub fn parse_hex(hex: &str) -> Result<Self, AirBarError> {
        let s = hex.trim().trim_start_matches('#');
        let invalid = || AirBarError::InvalidColor(hex.to_string());
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) || !(s.len() == 6 || s.len() == 8) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| invalid());
        let a = if s.len() == 8 { channel(6)? } else { 255 };
        Ok(Color(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_hex(self) -> String {
        if self.3 == 255 {
            format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.0, self.1, self.2, self.3)
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }
}

impl TryFrom<String> for Color {
    type Error = AirBarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Brush for filling shapes.
///
/// Gradient endpoints are normalized to the rect being filled: (0,0) is the
/// top-left corner and (1,1) the bottom-right one. Stops are spread evenly
/// from `start` to `end`.
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    Linear {
        start: Vec2,
        end: Vec2,
        stops: Vec<Color>,
    },
}

impl From<Color> for Brush {
    fn from(c: Color) -> Self {
        Brush::Solid(c)
    }
}

pub struct LinearGradient;

impl LinearGradient {
    /// Gradient through `stops`. Fewer than two distinct colors collapse to
    /// a solid brush (transparent when `stops` is empty).
    pub fn new(start: Vec2, end: Vec2, stops: Vec<Color>) -> Brush {
        match stops.first() {
            None => Brush::Solid(Color::TRANSPARENT),
            Some(&first) if stops.iter().all(|c| *c == first) => Brush::Solid(first),
            Some(_) => Brush::Linear { start, end, stops },
        }
    }

    pub fn vertical(top: Color, bottom: Color) -> Brush {
        Self::new(Vec2 { x: 0.0, y: 0.0 }, Vec2 { x: 0.0, y: 1.0 }, vec![top, bottom])
    }

    pub fn horizontal(left: Color, right: Color) -> Brush {
        Self::new(Vec2 { x: 0.0, y: 0.0 }, Vec2 { x: 1.0, y: 0.0 }, vec![left, right])
    }

    /// Top-left to bottom-right.
    pub fn diagonal(from: Color, to: Color) -> Brush {
        Self::new(Vec2 { x: 0.0, y: 0.0 }, Vec2 { x: 1.0, y: 1.0 }, vec![from, to])
    }
}
