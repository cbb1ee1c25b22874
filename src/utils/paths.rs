//! Configuration Paths
//!
//! Resolves where the notifier keeps its settings file when the host does
//! not pass an explicit path.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

const APP_DIR: &str = "tracker-telegram";
const SETTINGS_FILE: &str = "settings.json";

/// Platform config directory (`~/.config` on Linux).
pub fn config_dir() -> AppResult<PathBuf> {
    dirs::config_dir().ok_or_else(|| AppError::config("Could not determine config directory"))
}

/// `<config dir>/tracker-telegram/`
pub fn app_dir() -> AppResult<PathBuf> {
    Ok(config_dir()?.join(APP_DIR))
}

/// `<config dir>/tracker-telegram/settings.json`
pub fn settings_path() -> AppResult<PathBuf> {
    Ok(app_dir()?.join(SETTINGS_FILE))
}

pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
