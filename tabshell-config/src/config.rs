//! The `Config` struct, its defaults and YAML persistence.

use crate::error::ConfigError;
use crate::types::{LogLevel, TabId, TabKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder replaced by the tab id in `tab_label_template`
pub const LABEL_ID_PLACEHOLDER: &str = "{n}";

/// Application configuration, stored as YAML.
///
/// Missing keys fall back to their defaults so older files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Main window title
    pub window_title: String,
    /// Initial inner window size in logical points
    pub window_size: [f32; 2],
    /// Kind of the tab opened at startup (`None` starts with an empty strip)
    pub initial_tab_kind: Option<TabKind>,
    /// Label given to new tabs; `{n}` is replaced by the tab id
    pub tab_label_template: String,
    /// Maximum number of open tabs (0 = unlimited)
    pub max_tabs: usize,
    /// Ask before closing a tab
    pub confirm_close_tab: bool,
    /// Ask before quitting while tabs are open
    pub confirm_quit: bool,
    /// Show an information dialog after a successful save
    pub notify_on_save: bool,
    /// Debug log verbosity
    pub log_level: LogLevel,
    /// Polling interval of processor background runs, in milliseconds
    pub processor_tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: "Blank Multitab GUI Window".to_string(),
            window_size: [1280.0, 800.0],
            initial_tab_kind: Some(TabKind::Generic),
            tab_label_template: "New Tab #{n}".to_string(),
            max_tabs: 0,
            confirm_close_tab: true,
            confirm_quit: true,
            notify_on_save: true,
            log_level: LogLevel::default(),
            processor_tick_ms: 50,
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it when missing
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save_to(&config_path) {
                // A read-only home directory should not keep the shell from starting
                log::warn!("Failed to save default config: {}", e);
            }
            Ok(config)
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml_ng::from_str(&contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file.
    ///
    /// Writes a sibling temp file and renames it over the target so a crash
    /// never leaves a truncated config behind.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(|e| ConfigError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| ConfigError::io(path, e))?;
        Ok(())
    }

    /// Check semantic constraints serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_label_template.trim().is_empty() {
            return Err(ConfigError::Validation(
                "tab_label_template must not be empty".to_string(),
            ));
        }
        if self.processor_tick_ms == 0 {
            return Err(ConfigError::Validation(
                "processor_tick_ms must be greater than zero".to_string(),
            ));
        }
        if self.window_size.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(ConfigError::Validation(format!(
                "window_size must be positive, got {:?}",
                self.window_size
            )));
        }
        Ok(())
    }

    /// Render the default label for a tab
    pub fn label_for(&self, id: TabId) -> String {
        self.tab_label_template
            .replace(LABEL_ID_PLACEHOLDER, &id.to_string())
    }

    /// Whether another tab may be opened when `open` tabs exist
    pub fn allows_another_tab(&self, open: usize) -> bool {
        self.max_tabs == 0 || open < self.max_tabs
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("tabshell")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("tabshell")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
