//! JSON Configuration Management
//!
//! Reads and writes the notifier settings file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::settings::{NotifierSettings, SettingsUpdate};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{ensure_dir, settings_path};

/// Configuration service for notifier settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: NotifierSettings,
}

impl ConfigService {
    /// Open the settings file at the platform default location.
    pub fn new() -> AppResult<Self> {
        Self::at(settings_path()?)
    }

    /// Open the settings file at `path`, writing defaults if it is missing.
    pub fn at(path: impl Into<PathBuf>) -> AppResult<Self> {
        let config_path = path.into();
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent)?;
            }
        }

        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            let default_config = NotifierSettings::default();
            Self::save_to_file(&config_path, &default_config)?;
            default_config
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    fn load_from_file(path: &Path) -> AppResult<NotifierSettings> {
        let content = fs::read_to_string(path)?;
        let config: NotifierSettings = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    fn save_to_file(path: &Path, config: &NotifierSettings) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get_config(&self) -> &NotifierSettings {
        &self.config
    }

    /// Immutable snapshot for handing to a `NotifierService`.
    pub fn snapshot(&self) -> Arc<NotifierSettings> {
        Arc::new(self.config.clone())
    }

    /// Apply a partial update and persist it. Invalid updates leave both the
    /// file and the in-memory settings untouched.
    pub fn update_config(&mut self, update: SettingsUpdate) -> AppResult<NotifierSettings> {
        let mut next = self.config.clone();
        next.apply_update(update);
        Self::save_to_file(&self.config_path, &next)?;
        self.config = next;
        Ok(self.config.clone())
    }

    pub fn save(&self) -> AppResult<()> {
        Self::save_to_file(&self.config_path, &self.config)
    }

    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        Ok(())
    }

    pub fn reset(&mut self) -> AppResult<()> {
        self.config = NotifierSettings::default();
        self.save()
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }
}
