//! Text suggestions for seal content.

mod gemini;

pub use gemini::{GeminiSuggester, HttpTransport, UreqTransport};

use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while talking to a suggestion service.
///
/// These never leave a [`SuggestionProvider`]; they are logged and turned into
/// [`SealSuggestion::error`].
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Empty response from service")]
    EmptyResponse,
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Result type for suggestion requests.
pub type SuggestResult<T> = Result<T, SuggestError>;

/// Candidate seal texts. An empty field means "keep the current value".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SealSuggestion {
    pub top_text: String,
    pub bottom_text: String,
    pub center_text: String,
}

impl SealSuggestion {
    pub fn new(
        top_text: impl Into<String>,
        bottom_text: impl Into<String>,
        center_text: impl Into<String>,
    ) -> Self {
        Self {
            top_text: top_text.into(),
            bottom_text: bottom_text.into(),
            center_text: center_text.into(),
        }
    }

    /// Returned when no credentials are configured.
    pub fn placeholder() -> Self {
        Self::new("Example Company", "Since 2024", "★")
    }

    /// Returned when a request fails for any reason.
    pub fn error() -> Self {
        Self::new("Error", "Try Again", "?")
    }
}

/// A service that proposes seal texts for a topic.
///
/// Implementations must not fail: errors are reported through the returned
/// suggestion (see [`SealSuggestion::error`]).
pub trait SuggestionProvider: Send + Sync {
    fn suggest(&self, topic: &str, language: Language) -> SealSuggestion;
}

/// Provider that always returns the same suggestion.
#[derive(Debug, Clone)]
pub struct FixedSuggester(pub SealSuggestion);

impl SuggestionProvider for FixedSuggester {
    fn suggest(&self, topic: &str, language: Language) -> SealSuggestion {
        log::debug!("Fixed suggestion for {:?} ({})", topic, language.code());
        self.0.clone()
    }
}
