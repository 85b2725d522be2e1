//! Application controller: owns the seal state and redraws on every change.

use sealmaker_core::i18n::{Labels, Language, Localizer};
use sealmaker_core::layout::SEAL_SIZE;
use sealmaker_core::seal::{ColorPreset, FontFamily, SealConfig, SealEdit, SealShape};
use sealmaker_core::settings::{AppSettings, SettingsError};
use sealmaker_core::suggest::{GeminiSuggester, SealSuggestion, SuggestionProvider};
use sealmaker_render::{FontBook, PixmapSurface, RendererError, SealRenderer, Surface};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("Invalid seal config: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Startup options for [`SealApp`].
pub struct AppConfig {
    pub seal: SealConfig,
    pub language: Language,
    pub fonts: Arc<FontBook>,
    pub suggester: Arc<dyn SuggestionProvider>,
    /// Pixel multiplier for exported images.
    pub export_scale: f32,
}

impl AppConfig {
    /// Build startup options from process settings.
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            seal: SealConfig::default(),
            language: settings.language,
            fonts: Arc::new(FontBook::from_paths(&settings.fonts)),
            suggester: Arc::new(GeminiSuggester::from_settings(&settings.suggestion)),
            export_scale: settings.export_scale,
        }
    }
}

/// Holds the current seal, UI language and suggestion state.
///
/// Every mutation of the seal or language ends with exactly one redraw of the
/// preview surface.
pub struct SealApp {
    config: SealConfig,
    localizer: Localizer,
    prompt: String,
    suggester: Arc<dyn SuggestionProvider>,
    /// Result channel of the in-flight suggestion request, if any.
    pending: Option<Receiver<SealSuggestion>>,
    renderer: SealRenderer,
    surface: PixmapSurface,
    fonts: Arc<FontBook>,
    export_scale: f32,
    redraws: usize,
}

impl SealApp {
    pub fn new(options: AppConfig) -> AppResult<Self> {
        let surface = PixmapSurface::new(SEAL_SIZE, Arc::clone(&options.fonts))?;
        let mut app = Self {
            config: options.seal.normalized(),
            localizer: Localizer::new(options.language),
            prompt: String::new(),
            suggester: options.suggester,
            pending: None,
            renderer: SealRenderer::new(),
            surface,
            fonts: options.fonts,
            export_scale: options.export_scale,
            redraws: 0,
        };
        app.redraw();
        Ok(app)
    }

    pub fn config(&self) -> &SealConfig {
        &self.config
    }

    /// Replace one field of the seal and redraw.
    pub fn update(&mut self, edit: SealEdit) {
        log::debug!("Applying edit {:?}", edit);
        self.config = self.config.apply(edit);
        self.redraw();
    }

    /// Replace the whole seal and redraw.
    pub fn set_config(&mut self, config: SealConfig) {
        self.config = config.normalized();
        self.redraw();
    }

    pub fn language(&self) -> Language {
        self.localizer.language()
    }

    pub fn labels(&self) -> &'static Labels {
        self.localizer.labels()
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Switch the UI language. Subsequent suggestions are requested in it.
    pub fn set_language(&mut self, language: Language) {
        self.localizer.set_language(language);
        self.redraw();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Set the topic used for the next suggestion request.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Whether a suggestion request is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a suggestion request for the current prompt on a background thread.
    ///
    /// Returns `false` without doing anything if the prompt is empty or a
    /// request is already in flight. The prompt is sent as typed.
    pub fn request_suggestion(&mut self) -> bool {
        if self.prompt.is_empty() {
            log::debug!("Ignoring suggestion request with empty prompt");
            return false;
        }
        if self.is_busy() {
            log::debug!("Suggestion already in flight");
            return false;
        }

        let (tx, rx) = mpsc::channel();
        let suggester = Arc::clone(&self.suggester);
        let topic = self.prompt.clone();
        let language = self.localizer.language();

        let spawned = thread::Builder::new()
            .name("suggestion".to_string())
            .spawn(move || {
                let suggestion = suggester.suggest(&topic, language);
                if tx.send(suggestion).is_err() {
                    log::debug!("Suggestion receiver dropped");
                }
            });

        match spawned {
            Ok(_) => {
                log::info!("Requested suggestion ({})", language.code());
                self.pending = Some(rx);
                true
            }
            Err(e) => {
                log::error!("Failed to spawn suggestion thread: {}", e);
                false
            }
        }
    }

    /// Apply the suggestion if it has arrived. Never blocks.
    pub fn poll_suggestion(&mut self) -> Option<SealSuggestion> {
        let received = match self.pending.as_ref()?.try_recv() {
            Ok(suggestion) => suggestion,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                log::error!("Suggestion thread exited without a result");
                SealSuggestion::error()
            }
        };
        self.pending = None;
        self.apply_suggestion(&received);
        Some(received)
    }

    /// Block until the in-flight suggestion arrives and apply it.
    pub fn wait_suggestion(&mut self) -> Option<SealSuggestion> {
        let rx = self.pending.take()?;
        let received = rx.recv().unwrap_or_else(|_| {
            log::error!("Suggestion thread exited without a result");
            SealSuggestion::error()
        });
        self.apply_suggestion(&received);
        Some(received)
    }

    fn apply_suggestion(&mut self, suggestion: &SealSuggestion) {
        self.config = self.config.merge_suggestion(suggestion);
        self.redraw();
    }

    /// The preview surface.
    pub fn surface(&self) -> &PixmapSurface {
        &self.surface
    }

    /// Number of redraws since creation.
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    fn redraw(&mut self) {
        self.renderer.render(&self.config, &mut self.surface);
        self.redraws += 1;
    }

    /// Encode the seal as PNG at the configured export scale.
    pub fn export_png(&self) -> AppResult<Vec<u8>> {
        if (self.export_scale - self.surface.scale()).abs() < f32::EPSILON {
            return Ok(self.surface.encode_png()?);
        }
        let mut surface =
            PixmapSurface::with_scale(self.surface.size(), self.export_scale, Arc::clone(&self.fonts))?;
        self.renderer.render(&self.config, &mut surface);
        Ok(surface.encode_png()?)
    }

    /// Write the seal to `dir` as `seal-<unix millis>.png` and return the path.
    pub fn export_to_dir(&self, dir: &Path) -> AppResult<PathBuf> {
        let png_data = self.export_png()?;
        fs::create_dir_all(dir)
            .map_err(|e| AppError::Io(format!("Failed to create {}: {}", dir.display(), e)))?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let path = dir.join(export_file_name(millis));
        self.export_to_file(&png_data, &path)?;
        Ok(path)
    }

    /// Write the seal to an explicit path.
    pub fn export_to_path(&self, path: &Path) -> AppResult<()> {
        let png_data = self.export_png()?;
        self.export_to_file(&png_data, path)
    }

    fn export_to_file(&self, png_data: &[u8], path: &Path) -> AppResult<()> {
        fs::write(path, png_data)
            .map_err(|e| AppError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        log::info!("PNG export complete: {} ({} bytes)", path.display(), png_data.len());
        Ok(())
    }
}

/// One choice of the seal editor with its label in the current language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLabel {
    /// `shape`, `color` or `font`.
    pub group: &'static str,
    /// Value as written in seal config files.
    pub value: &'static str,
    pub label: &'static str,
}

/// Localized labels for every shape, color preset and font family.
pub fn option_labels(localizer: &Localizer) -> Vec<OptionLabel> {
    let shapes = SealShape::all().iter().map(|shape| OptionLabel {
        group: "shape",
        value: shape.name(),
        label: localizer.t(shape.name()),
    });
    let colors = ColorPreset::all().iter().map(|preset| OptionLabel {
        group: "color",
        value: preset.hex(),
        label: localizer.t(preset.label_key()),
    });
    let fonts = FontFamily::all().iter().map(|family| OptionLabel {
        group: "font",
        value: family.name(),
        label: localizer.t(family.label_key()),
    });
    shapes.chain(colors).chain(fonts).collect()
}

/// File name for an export taken at `millis` since the Unix epoch.
pub fn export_file_name(millis: u128) -> String {
    format!("seal-{}.png", millis)
}

/// Load a seal config from a JSON file.
pub fn load_seal_config(path: &Path) -> AppResult<SealConfig> {
    let json = fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    SealConfig::from_json(&json).map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
}
