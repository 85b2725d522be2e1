//! Font loading for the raster surface.

use crate::renderer::{RenderResult, RendererError};
use fontdue::{Font, FontSettings};
use sealmaker_core::seal::FontFamily;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Embedded DejaVu faces, used for families with no configured or installed Noto font.
static DEJAVU_SERIF_BOLD: &[u8] = include_bytes!("../assets/DejaVuSerif-Bold.ttf");
static DEJAVU_SANS_BOLD: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// System directories probed for font files, in order.
const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/noto",
    "/usr/share/fonts/opentype/noto",
    "/usr/share/fonts/noto",
    "/usr/share/fonts/google-noto",
    "/usr/share/fonts/google-noto-vf",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "C:\\Windows\\Fonts",
];

/// Loaded font faces, keyed by family and weight.
#[derive(Debug, Default)]
pub struct FontBook {
    faces: HashMap<(FontFamily, bool), Font>,
}

impl FontBook {
    /// Create an empty font book. Text drawn with it renders nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A font book holding only the embedded faces.
    pub fn bundled() -> Self {
        let mut book = Self::new();
        for &family in FontFamily::all() {
            book.load_bundled(family);
        }
        book
    }

    /// Load a bold face per family.
    ///
    /// Each family uses the configured path if it loads, then an installed Noto
    /// font, then the embedded face.
    pub fn from_paths(configured: &BTreeMap<FontFamily, PathBuf>) -> Self {
        let mut book = Self::new();
        for &family in FontFamily::all() {
            let candidates = configured
                .get(&family)
                .cloned()
                .into_iter()
                .chain(find_system_font(family));

            let mut loaded = false;
            for path in candidates {
                match book.load_file(family, true, &path) {
                    Ok(()) => {
                        loaded = true;
                        break;
                    }
                    Err(e) => log::warn!("{}", e),
                }
            }
            if !loaded {
                log::info!("Using embedded face for {}", family.name());
                book.load_bundled(family);
            }
        }
        book
    }

    fn load_bundled(&mut self, family: FontFamily) {
        let data = match family {
            FontFamily::NotoSerif => DEJAVU_SERIF_BOLD,
            FontFamily::NotoSans => DEJAVU_SANS_BOLD,
        };
        if let Err(e) = self.load_bytes(family, true, data.to_vec()) {
            log::error!("Embedded face for {} is unusable: {}", family.name(), e);
        }
    }

    /// Load a face from a font file.
    pub fn load_file(&mut self, family: FontFamily, bold: bool, path: &Path) -> RenderResult<()> {
        log::debug!("Loading {} (bold: {}) from {}", family.name(), bold, path.display());
        let data = fs::read(path).map_err(|e| {
            RendererError::Font(format!("Failed to read font file {}: {}", path.display(), e))
        })?;
        self.load_bytes(family, bold, data)
    }

    /// Load a face from font data (TTF/OTF).
    pub fn load_bytes(&mut self, family: FontFamily, bold: bool, data: Vec<u8>) -> RenderResult<()> {
        let font = Font::from_bytes(data, FontSettings::default()).map_err(|e| {
            RendererError::Font(format!("Failed to parse font for {}: {}", family.name(), e))
        })?;
        self.faces.insert((family, bold), font);
        Ok(())
    }

    /// Face for a family, falling back to the other weight of the same family.
    pub fn get(&self, family: FontFamily, bold: bool) -> Option<&Font> {
        self.faces
            .get(&(family, bold))
            .or_else(|| self.faces.get(&(family, !bold)))
    }

    /// Face that has a glyph for `ch`: the requested family first, then the
    /// other loaded families. `None` if no loaded face covers the character.
    pub fn face_for(&self, family: FontFamily, bold: bool, ch: char) -> Option<&Font> {
        let others = FontFamily::all().iter().copied().filter(move |&f| f != family);
        std::iter::once(family)
            .chain(others)
            .flat_map(|f| [(f, bold), (f, !bold)])
            .filter_map(|key| self.faces.get(&key))
            .find(|font| font.lookup_glyph_index(ch) != 0)
    }

    pub fn contains(&self, family: FontFamily) -> bool {
        self.get(family, true).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Probe well-known font directories for a family's bold font file.
pub fn find_system_font(family: FontFamily) -> Option<PathBuf> {
    let user_dir = dirs::font_dir();
    let dirs = user_dir
        .iter()
        .map(PathBuf::as_path)
        .chain(SYSTEM_FONT_DIRS.iter().map(Path::new));

    for dir in dirs {
        for name in family.bold_file_names() {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}
