/// File logger backing the `log` facade
///
/// Every `log::info!()` and friends lands in `tabshell_debug.log` in the
/// system temp directory (`/tmp` on Unix/macOS, `%TEMP%` on Windows), one
/// `[timestamp] [LEVEL] [target] message` line per record.
///
/// Level precedence: the `--log-level` CLI flag, then the `TABSHELL_LOG`
/// environment variable, then the config's `log_level` (applied once the
/// config has been loaded). When `TABSHELL_LOG` is set, output is mirrored to
/// stderr as well.
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable selecting the log level
pub const LOG_ENV_VAR: &str = "TABSHELL_LOG";

/// Set once the level came from the CLI or the environment, so the config
/// level does not override it
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

struct FileLogger {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl FileLogger {
    fn open(path: &PathBuf, mirror_stderr: bool) -> Self {
        let file = match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)
        {
            Ok(mut f) => {
                let _ = writeln!(
                    f,
                    "{}\ntabshell debug session started at {}\n{}",
                    "=".repeat(80),
                    get_timestamp(),
                    "=".repeat(80)
                );
                Some(f)
            }
            // Logging stays silent if the file cannot be opened
            Err(_) => None,
        };
        Self {
            file: Mutex::new(file),
            mirror_stderr,
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            &get_timestamp(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

fn format_line(timestamp: &str, level: log::Level, target: &str, msg: &str) -> String {
    format!("[{}] [{:<5}] [{}] {}\n", timestamp, level, target, msg)
}

fn get_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("tabshell_debug.log")
}

fn env_level() -> Option<LevelFilter> {
    std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
}

/// Install the file logger as the `log` backend.
///
/// `cli_level` wins over `TABSHELL_LOG`; with neither set the level stays at
/// `Info` until [`apply_config_level`] runs. Calling this twice is harmless.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let env = env_level();
    let mirror_stderr = std::env::var_os(LOG_ENV_VAR).is_some();
    let logger = LOGGER.get_or_init(|| FileLogger::open(&log_path(), mirror_stderr));

    if log::set_logger(logger).is_err() {
        // Another logger is already installed (tests, embedding)
        return;
    }

    let level = match (cli_level, env) {
        (Some(level), _) | (None, Some(level)) => {
            LEVEL_PINNED.store(true, Ordering::Relaxed);
            level
        }
        (None, None) => LevelFilter::Info,
    };
    log::set_max_level(level);
}

/// Apply the configured level unless the CLI or environment already chose one
pub fn apply_config_level(level: LevelFilter) {
    if LEVEL_PINNED.load(Ordering::Relaxed) {
        return;
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_format() {
        let line = format_line("2026-01-01 00:00:00.000", log::Level::Warn, "tabshell::shell", "hi");
        assert_eq!(line, "[2026-01-01 00:00:00.000] [WARN ] [tabshell::shell] hi\n");
    }

    #[test]
    fn log_file_lives_in_temp_dir() {
        let path = log_path();
        assert!(path.starts_with(std::env::temp_dir()));
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("tabshell_debug.log"));
    }
}
