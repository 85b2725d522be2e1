//! SealMaker Core Library
//!
//! Platform-agnostic data model, seal geometry and external collaborators
//! (localization, text suggestions, settings) for the seal maker.

pub mod i18n;
pub mod layout;
pub mod seal;
pub mod settings;
pub mod suggest;

pub use i18n::{Labels, Language, Localizer};
pub use layout::{ArcGlyph, ArcSide, BorderGeometry, BorderOutline, BorderStroke, arc_layout};
pub use seal::{ColorPreset, FontFamily, SealConfig, SealEdit, SealShape, parse_color};
pub use settings::{AppSettings, SettingsError, SuggestionSettings};
pub use suggest::{
    FixedSuggester, GeminiSuggester, HttpTransport, SealSuggestion, SuggestError, SuggestionProvider,
    UreqTransport,
};
