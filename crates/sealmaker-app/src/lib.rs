//! SealMaker Application
//!
//! The application controller tying the seal model, renderer, localization
//! and suggestion service together.

mod app;

pub use app::{
    AppConfig, AppError, AppResult, OptionLabel, SealApp, export_file_name, load_seal_config,
    option_labels,
};
