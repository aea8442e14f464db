//! Color names, hex specs and the preset table.
//!
//! A color string is either one of the eight preset names (case-insensitive)
//! or an X11-style hex spec: `#RGB`, `#RRGGBB`, `#RRRGGGBBB` or
//! `#RRRRGGGGBBBB`. Hex digits are the most significant bits of each channel,
//! so `#f00` is `(240, 0, 0)`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use egui::Color32;
use once_cell::sync::Lazy;

use crate::error::AppError;

/// The colors offered directly in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Black,
    White,
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
}

static PRESET_BY_NAME: Lazy<HashMap<&'static str, Preset>> =
    Lazy::new(|| Preset::ALL.iter().map(|&p| (p.name(), p)).collect());

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::Black,
        Preset::White,
        Preset::Red,
        Preset::Green,
        Preset::Blue,
        Preset::Cyan,
        Preset::Magenta,
        Preset::Yellow,
    ];

    /// Lowercase color name, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Black => "black",
            Preset::White => "white",
            Preset::Red => "red",
            Preset::Green => "green",
            Preset::Blue => "blue",
            Preset::Cyan => "cyan",
            Preset::Magenta => "magenta",
            Preset::Yellow => "yellow",
        }
    }

    /// Title-cased name shown in the menu.
    pub fn label(self) -> &'static str {
        match self {
            Preset::Black => "Black",
            Preset::White => "White",
            Preset::Red => "Red",
            Preset::Green => "Green",
            Preset::Blue => "Blue",
            Preset::Cyan => "Cyan",
            Preset::Magenta => "Magenta",
            Preset::Yellow => "Yellow",
        }
    }

    pub fn rgb(self) -> Color32 {
        match self {
            Preset::Black => Color32::from_rgb(0, 0, 0),
            Preset::White => Color32::from_rgb(255, 255, 255),
            Preset::Red => Color32::from_rgb(255, 0, 0),
            Preset::Green => Color32::from_rgb(0, 255, 0),
            Preset::Blue => Color32::from_rgb(0, 0, 255),
            Preset::Cyan => Color32::from_rgb(0, 255, 255),
            Preset::Magenta => Color32::from_rgb(255, 0, 255),
            Preset::Yellow => Color32::from_rgb(255, 255, 0),
        }
    }

    /// Case-insensitive lookup.
    pub fn from_name(name: &str) -> Option<Preset> {
        PRESET_BY_NAME.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// Black and white are not usable as their own menu text color.
    pub fn is_achromatic(self) -> bool {
        matches!(self, Preset::Black | Preset::White)
    }
}

/// A color that has been validated and can be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpec {
    Preset(Preset),
    Custom(Color32),
}

impl ColorSpec {
    pub const BLACK: ColorSpec = ColorSpec::Preset(Preset::Black);

    pub fn rgb(self) -> Color32 {
        match self {
            ColorSpec::Preset(p) => p.rgb(),
            ColorSpec::Custom(c) => c,
        }
    }
}

impl FromStr for ColorSpec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(preset) = Preset::from_name(s) {
            return Ok(ColorSpec::Preset(preset));
        }
        parse_hex(s)
            .map(ColorSpec::Custom)
            .ok_or_else(|| AppError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpec::Preset(p) => f.write_str(p.name()),
            ColorSpec::Custom(c) => f.write_str(&to_hex(*c)),
        }
    }
}

/// Parse `#` followed by 3, 6, 9 or 12 hex digits.
pub fn parse_hex(s: &str) -> Option<Color32> {
    let digits = s.strip_prefix('#')?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let width = match digits.len() {
        3 | 6 | 9 | 12 => digits.len() / 3,
        _ => return None,
    };
    let channel = |i: usize| -> Option<u8> {
        let v = u16::from_str_radix(&digits[i * width..(i + 1) * width], 16).ok()?;
        let bits = 4 * width as u32;
        Some(if bits < 8 {
            (v << (8 - bits)) as u8
        } else {
            (v >> (bits - 8)) as u8
        })
    };
    Some(Color32::from_rgb(channel(0)?, channel(1)?, channel(2)?))
}

/// Lowercase `#rrggbb`.
pub fn to_hex(c: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}
