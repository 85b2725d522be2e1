//! Seal colors.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Colors offered by the color picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorPreset {
    Red,
    Blue,
    Green,
    Black,
}

impl ColorPreset {
    /// Hex string stored in the seal config.
    pub fn hex(self) -> &'static str {
        match self {
            ColorPreset::Red => "#dc2626",
            ColorPreset::Blue => "#2563eb",
            ColorPreset::Green => "#16a34a",
            ColorPreset::Black => "#000000",
        }
    }

    /// Key of the localized label for this preset.
    pub fn label_key(self) -> &'static str {
        match self {
            ColorPreset::Red => "red",
            ColorPreset::Blue => "blue",
            ColorPreset::Green => "green",
            ColorPreset::Black => "black",
        }
    }

    /// Get all presets in picker order.
    pub fn all() -> &'static [ColorPreset] {
        &[
            ColorPreset::Red,
            ColorPreset::Blue,
            ColorPreset::Green,
            ColorPreset::Black,
        ]
    }
}

/// Parse a color string: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` or a basic CSS name.
pub fn parse_color(text: &str) -> Option<Color> {
    let text = text.trim();
    let named = match text.to_ascii_lowercase().as_str() {
        "black" => Some((0, 0, 0, 255)),
        "white" => Some((255, 255, 255, 255)),
        "red" => Some((255, 0, 0, 255)),
        "green" => Some((0, 128, 0, 255)),
        "blue" => Some((0, 0, 255, 255)),
        "navy" => Some((0, 0, 128, 255)),
        "maroon" => Some((128, 0, 0, 255)),
        "purple" => Some((128, 0, 128, 255)),
        "gray" | "grey" => Some((128, 128, 128, 255)),
        "transparent" => Some((0, 0, 0, 0)),
        _ => None,
    };
    if let Some((r, g, b, a)) = named {
        return Some(Color::from_rgba8(r, g, b, a));
    }

    let hex = text.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(Color::from_rgba8(r, g, b, a))
}
