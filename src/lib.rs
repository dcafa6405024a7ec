// Library exports for the binary and the integration tests

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod cli;
pub mod debug;
pub mod kinds;
pub mod shell;
pub mod tab;

pub use tabshell_config as config;
