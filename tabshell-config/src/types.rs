//! Shared value types used by the configuration and by the shell core.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a tab. Allocated once, never reused within a run.
pub type TabId = u64;

/// Discriminator selecting which layout, save logic and teardown apply to a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    /// Demonstration form with spinboxes, an option combo and text entries
    Generic,
    /// Plain text editor saving to a single file
    Editor,
    /// Signal processor with a cancellable background run
    Processor,
}

impl TabKind {
    /// Lowercase name used in config files and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            TabKind::Generic => "generic",
            TabKind::Editor => "editor",
            TabKind::Processor => "processor",
        }
    }

    /// Display name for menus
    pub fn display_name(self) -> &'static str {
        match self {
            TabKind::Generic => "Generic",
            TabKind::Editor => "Editor",
            TabKind::Processor => "Processor",
        }
    }

    /// All kinds, in menu order
    pub fn all() -> &'static [TabKind] {
        &[TabKind::Generic, TabKind::Editor, TabKind::Processor]
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TabKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(TabKind::Generic),
            "editor" => Ok(TabKind::Editor),
            "processor" => Ok(TabKind::Processor),
            other => Err(format!(
                "unknown tab kind '{other}' (expected generic, editor or processor)"
            )),
        }
    }
}

/// Log level for the debug log file.
///
/// The `--log-level` CLI flag and the `TABSHELL_LOG` environment variable
/// take precedence over the configured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}
