//! Registered font families.

use serde::{Deserialize, Serialize};

/// Font family options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum FontFamily {
    /// Noto Serif (default).
    #[default]
    #[serde(rename = "Noto Serif")]
    NotoSerif,
    /// Noto Sans clean sans-serif font.
    #[serde(rename = "Noto Sans")]
    NotoSans,
}

impl FontFamily {
    /// Get the font family name as used by the renderer.
    pub fn name(&self) -> &'static str {
        match self {
            FontFamily::NotoSerif => "Noto Serif",
            FontFamily::NotoSans => "Noto Sans",
        }
    }

    /// Key of the localized label for this family.
    pub fn label_key(&self) -> &'static str {
        match self {
            FontFamily::NotoSerif => "serif",
            FontFamily::NotoSans => "sans",
        }
    }

    /// Look up a family by its renderer name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|family| family.name().eq_ignore_ascii_case(name))
    }

    /// Bold font file names to probe in system font directories.
    pub fn bold_file_names(&self) -> &'static [&'static str] {
        match self {
            FontFamily::NotoSerif => &["NotoSerif-Bold.ttf", "NotoSerif-Bold.otf"],
            FontFamily::NotoSans => &["NotoSans-Bold.ttf", "NotoSans-Bold.otf"],
        }
    }

    /// Get all available font families.
    pub fn all() -> &'static [FontFamily] {
        &[FontFamily::NotoSerif, FontFamily::NotoSans]
    }
}
