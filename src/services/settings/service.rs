use crate::models::settings::Settings;
use anyhow::{anyhow, Context, Result};
#[cfg(not(debug_assertions))]
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service backed by the platform config directory, or `./config.toml`
    pub fn from_default_location() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        #[cfg(debug_assertions)]
        {
            PathBuf::from(CONFIG_FILE)
        }

        #[cfg(not(debug_assertions))]
        {
            if let Some(proj_dirs) = ProjectDirs::from("com", "WeddingPlanner", "WeddingBooking") {
                proj_dirs.config_dir().join(CONFIG_FILE)
            } else {
                PathBuf::from(CONFIG_FILE)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current settings; a missing file yields the defaults
    pub fn get(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings: Settings = toml::from_str(&data)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;

        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    /// Like `get`, but logs failures and falls back to defaults
    pub fn get_or_default(&self) -> Settings {
        match self.get() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings: {:#}, using defaults", e);
                Settings::default()
            }
        }
    }

    /// Update settings
    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create dir {}", parent.display()))?;
            }
        }

        let data = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&Settings::default())
    }
}
