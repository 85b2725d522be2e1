//! Seal configuration model.

mod color;
mod font;

pub use color::{ColorPreset, parse_color};
pub use font::FontFamily;

use crate::suggest::SealSuggestion;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed border widths in pixels.
pub const BORDER_WIDTH_RANGE: RangeInclusive<u32> = 2..=20;

/// Width of the thin inner stroke, independent of the border width.
pub const INNER_STROKE_WIDTH: f64 = 2.0;

/// Outline shape of a seal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SealShape {
    #[default]
    Circle,
    Square,
    Oval,
}

impl SealShape {
    /// Stable identifier used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            SealShape::Circle => "circle",
            SealShape::Square => "square",
            SealShape::Oval => "oval",
        }
    }

    /// Parse a shape identifier (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "circle" => Some(SealShape::Circle),
            "square" => Some(SealShape::Square),
            "oval" => Some(SealShape::Oval),
            _ => None,
        }
    }

    /// Whether top and bottom text follow an arc for this shape.
    pub fn uses_arc_text(self) -> bool {
        !matches!(self, SealShape::Square)
    }

    /// Get all available shapes.
    pub fn all() -> &'static [SealShape] {
        &[SealShape::Circle, SealShape::Square, SealShape::Oval]
    }
}

/// Complete set of user-adjustable parameters for one render.
///
/// A config is a snapshot: edits produce a new value through [`SealConfig::apply`]
/// or [`SealConfig::merge_suggestion`] instead of mutating in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SealConfig {
    /// Text laid along the upper arc (or the top line for squares).
    pub top_text: String,
    /// Text laid along the lower arc (or the bottom line for squares).
    pub bottom_text: String,
    /// Large text in the middle of the seal.
    pub center_text: String,
    pub shape: SealShape,
    /// Stroke and fill color, hex or CSS name.
    pub color: String,
    /// Outer stroke width, within [`BORDER_WIDTH_RANGE`].
    pub border_width: u32,
    pub font_family: FontFamily,
}

impl Default for SealConfig {
    fn default() -> Self {
        Self {
            top_text: "OFFICIAL SEAL".to_string(),
            bottom_text: "EST. 2024".to_string(),
            center_text: "★".to_string(),
            shape: SealShape::Circle,
            color: ColorPreset::Red.hex().to_string(),
            border_width: 8,
            font_family: FontFamily::NotoSerif,
        }
    }
}

/// A single field edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SealEdit {
    TopText(String),
    BottomText(String),
    CenterText(String),
    Shape(SealShape),
    Color(String),
    BorderWidth(u32),
    FontFamily(FontFamily),
}

impl SealConfig {
    /// Return a new config with one field replaced.
    pub fn apply(&self, edit: SealEdit) -> Self {
        let mut next = self.clone();
        match edit {
            SealEdit::TopText(text) => next.top_text = text,
            SealEdit::BottomText(text) => next.bottom_text = text,
            SealEdit::CenterText(text) => next.center_text = text,
            SealEdit::Shape(shape) => next.shape = shape,
            SealEdit::Color(color) => next.color = color,
            SealEdit::BorderWidth(width) => next.border_width = clamp_border_width(width),
            SealEdit::FontFamily(family) => next.font_family = family,
        }
        next
    }

    /// Merge a text suggestion, keeping current values for empty suggested fields.
    pub fn merge_suggestion(&self, suggestion: &SealSuggestion) -> Self {
        let pick = |suggested: &str, current: &str| {
            if suggested.is_empty() {
                current.to_string()
            } else {
                suggested.to_string()
            }
        };
        Self {
            top_text: pick(&suggestion.top_text, &self.top_text),
            bottom_text: pick(&suggestion.bottom_text, &self.bottom_text),
            center_text: pick(&suggestion.center_text, &self.center_text),
            ..self.clone()
        }
    }

    /// Clamp values that arrived from outside the editing path (e.g. a JSON file).
    pub fn normalized(mut self) -> Self {
        self.border_width = clamp_border_width(self.border_width);
        self
    }

    /// Resolved drawing color; unparseable strings fall back to black.
    pub fn resolved_color(&self) -> Color {
        parse_color(&self.color).unwrap_or_else(|| {
            log::debug!("Unrecognized seal color {:?}, using black", self.color);
            Color::from_rgba8(0, 0, 0, 255)
        })
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::normalized)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn clamp_border_width(width: u32) -> u32 {
    width.clamp(*BORDER_WIDTH_RANGE.start(), *BORDER_WIDTH_RANGE.end())
}
