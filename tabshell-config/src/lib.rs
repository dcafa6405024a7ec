//! Configuration system for the tabshell multi-tab desktop shell.
//!
//! This crate provides configuration loading, saving, validation and default
//! values, plus the small value types shared with the shell core:
//!
//! - [`Config`] and its YAML persistence
//! - [`TabId`] and [`TabKind`]
//! - [`LogLevel`] for the debug log file

pub mod config;
pub mod error;
mod types;

pub use config::{Config, LABEL_ID_PLACEHOLDER};
pub use error::ConfigError;
pub use types::{LogLevel, TabId, TabKind};
