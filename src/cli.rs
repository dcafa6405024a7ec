//! Command-line interface for tabshell.

use crate::config::{Config, LogLevel, TabKind};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// tabshell - A blank multi-tab desktop window
#[derive(Parser, Debug)]
#[command(name = "tabshell")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Kind of tab to open at startup (generic, editor, processor)
    #[arg(long, value_name = "KIND")]
    pub kind: Option<TabKind>,

    /// Start without opening a tab
    #[arg(long, conflicts_with = "kind")]
    pub no_initial_tab: bool,

    /// Load configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Overrides the configured initial tab kind
    pub initial_kind: Option<TabKind>,
    pub no_initial_tab: bool,
    pub config_path: Option<PathBuf>,
    pub log_level: Option<LevelFilter>,
}

impl RuntimeOptions {
    /// Kind of the tab to open at startup, if any
    pub fn initial_tab_kind(&self, config: &Config) -> Option<TabKind> {
        if self.no_initial_tab {
            None
        } else {
            self.initial_kind.or(config.initial_tab_kind)
        }
    }
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            initial_kind: cli.kind,
            no_initial_tab: cli.no_initial_tab,
            config_path: cli.config,
            log_level: cli.log_level.map(LogLevel::to_level_filter),
        }
    }
}

/// Parse the process arguments
pub fn process_cli() -> RuntimeOptions {
    Cli::parse().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> RuntimeOptions {
        Cli::try_parse_from(std::iter::once("tabshell").chain(args.iter().copied()))
            .unwrap()
            .into()
    }

    #[test]
    fn no_flags_defer_to_config() {
        let options = parse(&[]);
        let config = Config::default();
        assert_eq!(options.initial_tab_kind(&config), config.initial_tab_kind);
        assert!(options.log_level.is_none());
    }

    #[test]
    fn kind_flag_overrides_config() {
        let options = parse(&["--kind", "processor", "--log-level", "debug"]);
        assert_eq!(
            options.initial_tab_kind(&Config::default()),
            Some(TabKind::Processor)
        );
        assert_eq!(options.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn no_initial_tab_wins() {
        let options = parse(&["--no-initial-tab"]);
        assert_eq!(options.initial_tab_kind(&Config::default()), None);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["tabshell", "--kind", "spreadsheet"]).is_err());
        assert!(Cli::try_parse_from(["tabshell", "--kind", "editor", "--no-initial-tab"]).is_err());
    }
}
