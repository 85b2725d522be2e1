//! Main application entry point.

use clap::Parser;
use sealmaker_app::{AppConfig, AppError, AppResult, SealApp, load_seal_config, option_labels};
use sealmaker_core::i18n::{Language, Localizer};
use sealmaker_core::seal::{FontFamily, SealConfig, SealEdit, SealShape};
use sealmaker_core::settings::AppSettings;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sealmaker")]
#[command(version)]
#[command(about = "Render circular, square and oval seals to PNG", long_about = None)]
struct Cli {
    /// Seal config JSON file to start from
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Text along the top edge
    #[arg(long)]
    top: Option<String>,

    /// Text along the bottom edge
    #[arg(long)]
    bottom: Option<String>,

    /// Text in the middle
    #[arg(long)]
    center: Option<String>,

    /// circle, square or oval
    #[arg(long, value_parser = parse_shape)]
    shape: Option<SealShape>,

    /// Hex color (#dc2626) or CSS color name
    #[arg(long)]
    color: Option<String>,

    /// Outer border width in pixels (2-20)
    #[arg(long)]
    border_width: Option<u32>,

    /// "Noto Serif" or "Noto Sans"
    #[arg(long, value_parser = parse_font)]
    font: Option<FontFamily>,

    /// Ask the suggestion service for texts about this topic
    #[arg(long)]
    suggest: Option<String>,

    /// UI and suggestion language (en, es, zh, fr)
    #[arg(long, value_parser = parse_language)]
    lang: Option<Language>,

    /// Output PNG path (default: seal-<timestamp>.png in the export directory)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Export pixel multiplier
    #[arg(long)]
    scale: Option<f32>,

    /// Settings file (default: <config dir>/sealmaker/settings.json)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print the UI labels for the selected language and exit
    #[arg(long)]
    labels: bool,

    /// Print the final seal config as JSON
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Field overrides given on the command line, in a fixed order.
    fn edits(&self) -> Vec<SealEdit> {
        let mut edits = Vec::new();
        if let Some(text) = &self.top {
            edits.push(SealEdit::TopText(text.clone()));
        }
        if let Some(text) = &self.bottom {
            edits.push(SealEdit::BottomText(text.clone()));
        }
        if let Some(text) = &self.center {
            edits.push(SealEdit::CenterText(text.clone()));
        }
        if let Some(shape) = self.shape {
            edits.push(SealEdit::Shape(shape));
        }
        if let Some(color) = &self.color {
            edits.push(SealEdit::Color(color.clone()));
        }
        if let Some(width) = self.border_width {
            edits.push(SealEdit::BorderWidth(width));
        }
        if let Some(family) = self.font {
            edits.push(SealEdit::FontFamily(family));
        }
        edits
    }
}

fn parse_shape(s: &str) -> Result<SealShape, String> {
    SealShape::from_name(s).ok_or_else(|| format!("unknown shape '{}'", s))
}

fn parse_font(s: &str) -> Result<FontFamily, String> {
    FontFamily::from_name(s).ok_or_else(|| format!("unknown font family '{}'", s))
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::from_code(s).ok_or_else(|| format!("unknown language '{}'", s))
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting SealMaker");

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let mut settings = AppSettings::load_or_default(cli.settings.as_deref())?;
    if let Some(language) = cli.lang {
        settings.language = language;
    }
    if let Some(scale) = cli.scale {
        settings.export_scale = scale;
    }

    if cli.labels {
        let localizer = Localizer::new(settings.language);
        for (key, text) in localizer.labels().entries() {
            println!("{}\t{}", key, text);
        }
        for option in option_labels(&localizer) {
            println!("{}\t{}\t{}", option.group, option.value, option.label);
        }
        return Ok(());
    }

    let seal = match &cli.config {
        Some(path) => load_seal_config(path)?,
        None => SealConfig::default(),
    };

    let mut options = AppConfig::from_settings(&settings);
    options.seal = seal;
    let mut app = SealApp::new(options)?;
    for edit in cli.edits() {
        app.update(edit);
    }

    if let Some(topic) = &cli.suggest {
        app.set_prompt(topic.as_str());
        if app.request_suggestion() {
            if let Some(suggestion) = app.wait_suggestion() {
                log::info!(
                    "Suggested: {:?} / {:?} / {:?}",
                    suggestion.top_text,
                    suggestion.bottom_text,
                    suggestion.center_text
                );
            }
        } else {
            log::warn!("Empty topic, skipping suggestion");
        }
    }

    if cli.print_config {
        let json = app
            .config()
            .to_json()
            .map_err(|e| AppError::Config(e.to_string()))?;
        println!("{}", json);
    }

    let path = match &cli.out {
        Some(path) => {
            app.export_to_path(path)?;
            path.clone()
        }
        None => {
            let dir = settings.export_dir.clone().unwrap_or_else(|| PathBuf::from("."));
            app.export_to_dir(&dir)?
        }
    };
    println!("{}", path.display());
    Ok(())
}
