// ABOUTME: Configuration management for scopewise
// Layered TOML files with serde defaults plus a couple of environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::wizard::export::ConsultantInfo;
use crate::wizard::review::ReviewSource;
use crate::wizard::session::SessionSettings;
use crate::wizard::uploads::DEFAULT_MAX_UPLOAD_BYTES;

pub const DRAFTS_DIR_ENV: &str = "SCOPEWISE_DRAFTS_DIR";
pub const EXPORT_DIR_ENV: &str = "SCOPEWISE_EXPORT_DIR";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where step drafts are kept
    #[serde(default)]
    pub storage: StorageConfig,

    /// Debounce, status and simulated-work timings
    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub uploads: UploadConfig,

    /// Where generated questionnaire documents are written
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub review: ReviewConfig,

    /// Contact shown on the confirmation page
    #[serde(default)]
    pub consultant: ConsultantInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_drafts_dir")]
    pub drafts_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Quiet period before an edit is written to the draft store
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,

    /// How long "Draft saved" / "Save failed" stay visible
    #[serde(default = "default_save_status_reset_ms")]
    pub save_status_reset_ms: u64,

    /// Auto-hide delay for validation toasts
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,

    /// Delay used for document generation and email delivery
    #[serde(default = "default_simulated_work_ms")]
    pub simulated_work_ms: u64,

    #[serde(default = "default_preview_toast_ms")]
    pub preview_toast_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// None means the current working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default)]
    pub source: ReviewSource,
}

fn default_drafts_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".scopewise").join("drafts"))
        .unwrap_or_else(|| PathBuf::from(".scopewise").join("drafts"))
}

fn default_autosave_debounce_ms() -> u64 {
    2000
}

fn default_save_status_reset_ms() -> u64 {
    2000
}

fn default_toast_duration_ms() -> u64 {
    5000
}

fn default_simulated_work_ms() -> u64 {
    1500
}

fn default_preview_toast_ms() -> u64 {
    3000
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            drafts_dir: default_drafts_dir(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            autosave_debounce_ms: default_autosave_debounce_ms(),
            save_status_reset_ms: default_save_status_reset_ms(),
            toast_duration_ms: default_toast_duration_ms(),
            simulated_work_ms: default_simulated_work_ms(),
            preview_toast_ms: default_preview_toast_ms(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            timing: TimingConfig::default(),
            uploads: UploadConfig::default(),
            export: ExportConfig::default(),
            review: ReviewConfig::default(),
            consultant: ConsultantInfo::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_paths(&Self::get_config_paths())?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Merge the given files, lowest precedence first. Missing files are skipped.
    pub fn load_from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Self::default();

        for path in paths {
            if !path.exists() {
                continue;
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;

            let file_config: AppConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;

            debug!(path = %path.display(), "Loaded config file");
            config.merge(file_config);
        }

        Ok(config)
    }

    /// Save configuration to user config directory
    pub fn save(&self) -> Result<PathBuf> {
        let config_dir = Self::get_user_config_dir()?;
        self.save_to_dir(&config_dir)
    }

    pub fn save_to_dir(&self, config_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(config_dir)
            .with_context(|| format!("Failed to create {}", config_dir.display()))?;

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(config_path)
    }

    /// Configuration file paths, lowest precedence first
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        // User config (~/.scopewise/config/config.toml)
        if let Ok(config_dir) = Self::get_user_config_dir() {
            paths.push(config_dir.join("config.toml"));
        }

        // Local project config wins
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(".scopewise").join("config.toml"));
        }

        paths
    }

    fn get_user_config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home_dir.join(".scopewise").join("config"))
    }

    /// Merge another config into this one; values left at their defaults do not override
    fn merge(&mut self, other: AppConfig) {
        if other.storage.drafts_dir != default_drafts_dir() {
            self.storage.drafts_dir = other.storage.drafts_dir;
        }

        let defaults = TimingConfig::default();
        if other.timing.autosave_debounce_ms != defaults.autosave_debounce_ms {
            self.timing.autosave_debounce_ms = other.timing.autosave_debounce_ms;
        }
        if other.timing.save_status_reset_ms != defaults.save_status_reset_ms {
            self.timing.save_status_reset_ms = other.timing.save_status_reset_ms;
        }
        if other.timing.toast_duration_ms != defaults.toast_duration_ms {
            self.timing.toast_duration_ms = other.timing.toast_duration_ms;
        }
        if other.timing.simulated_work_ms != defaults.simulated_work_ms {
            self.timing.simulated_work_ms = other.timing.simulated_work_ms;
        }
        if other.timing.preview_toast_ms != defaults.preview_toast_ms {
            self.timing.preview_toast_ms = other.timing.preview_toast_ms;
        }

        if other.uploads.max_file_bytes != default_max_file_bytes() {
            self.uploads.max_file_bytes = other.uploads.max_file_bytes;
        }
        if other.export.output_dir.is_some() {
            self.export.output_dir = other.export.output_dir;
        }
        if other.review.source != ReviewSource::default() {
            self.review.source = other.review.source;
        }
        if other.consultant != ConsultantInfo::default() {
            self.consultant = other.consultant;
        }
    }

    /// Apply `SCOPEWISE_*` overrides through the given lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DRAFTS_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.storage.drafts_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(EXPORT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.export.output_dir = Some(PathBuf::from(dir));
        }
    }

    /// Directory for generated documents
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            autosave_debounce: Duration::from_millis(self.timing.autosave_debounce_ms),
            save_status_reset: Duration::from_millis(self.timing.save_status_reset_ms),
            review_source: self.review.source,
            max_upload_bytes: self.uploads.max_file_bytes,
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.timing.toast_duration_ms)
    }

    pub fn simulated_work(&self) -> Duration {
        Duration::from_millis(self.timing.simulated_work_ms)
    }

    pub fn preview_toast(&self) -> Duration {
        Duration::from_millis(self.timing.preview_toast_ms)
    }
}
