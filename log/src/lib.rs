//! Logging setup for stamp with file output and optional stderr.
//!
//! Logs always go to a file at `warn` level (or the filter from the environment).
//! Console logging goes to stderr, keeping stdout free for command output, and is
//! enabled when `STAMP_LOG` or `RUST_LOG` is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`STAMP_LOG`** (highest priority) - stamp-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for stamp crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/stamp/logs/stamp-<pid>.log`
//! - macOS: `~/Library/Application Support/stamp/logs/stamp-12345.log`
//! - Linux: `~/.local/share/stamp/logs/stamp-12345.log`
//!
//! Override with `--log-file <path>` or `STAMP_LOG_FILE`.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Crates whose level `STAMP_LOG=<level>` sets.
const STAMP_CRATES: &[&str] = &["stamp", "stamp_bin", "stamp_log", "stamp_vcs"];

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default)]
pub struct LogConfig {
    /// A file path, or a directory to place `stamp-<pid>.log` in.
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// This function respects the environment variable priority described in the module docs:
/// `STAMP_LOG` > `RUST_LOG` > default settings.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program --
/// dropping it flushes and stops the background file writer.
///
/// Fails if the log directory cannot be created or a global subscriber is
/// already installed.
pub fn init(config: LogConfig) -> Result<LogGuard, BoxError> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_file_filter());

    let console_enabled =
        env::var("STAMP_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);

    let console_layer = console_enabled.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(create_filter())
    });

    Registry::default()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Console-only (no file output), captured by the test harness. Will not crash if
/// called multiple times or if logging is already initialized by another test.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("stamp-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir.to_path_buf(), name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stamp")
        .join("logs");

    (dir, filename)
}

/// File filter: uses user-specified level if set, otherwise defaults to `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var("STAMP_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

/// Create the appropriate [`EnvFilter`] based on environment variables.
///
/// Implements the priority system: `STAMP_LOG` > `RUST_LOG` > defaults.
fn create_filter() -> EnvFilter {
    if let Ok(stamp_log) = env::var("STAMP_LOG") {
        return EnvFilter::new(expand_stamp_log(&stamp_log));
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    EnvFilter::new(expand_stamp_log("info"))
}

/// Expand `STAMP_LOG` values into full tracing filter directives.
///
/// - `STAMP_LOG=debug` becomes `warn,stamp=debug,stamp_bin=debug,...`
/// - `STAMP_LOG=stamp=trace,stamp_vcs=debug` is used as-is (advanced syntax)
fn expand_stamp_log(stamp_log: &str) -> String {
    if stamp_log.contains('=') || stamp_log.contains(':') || stamp_log.contains(',') {
        return stamp_log.to_string();
    }

    let mut directives = String::from("warn");
    for krate in STAMP_CRATES {
        directives.push_str(&format!(",{krate}={stamp_log}"));
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::{expand_stamp_log, resolve_log_path};
    use std::path::PathBuf;

    #[test]
    fn expand_level() {
        assert_eq!(
            expand_stamp_log("debug"),
            "warn,stamp=debug,stamp_bin=debug,stamp_log=debug,stamp_vcs=debug"
        );
    }

    #[test]
    fn expand_passes_directives_through() {
        assert_eq!(
            expand_stamp_log("stamp=trace,stamp_vcs=debug"),
            "stamp=trace,stamp_vcs=debug"
        );
        assert_eq!(expand_stamp_log("stamp::info=trace"), "stamp::info=trace");
    }

    #[test]
    fn log_file_override() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.log");

        let (log_dir, name) = resolve_log_path(Some(file));
        assert_eq!(log_dir, dir.path());
        assert_eq!(name, "custom.log");
    }

    #[test]
    fn log_dir_override() {
        let dir = tempfile::tempdir().unwrap();

        let (log_dir, name) = resolve_log_path(Some(dir.path().to_path_buf()));
        assert_eq!(log_dir, dir.path());
        assert_eq!(name, format!("stamp-{}.log", std::process::id()));
    }

    #[test]
    fn bare_file_name_goes_in_cwd() {
        let (log_dir, name) = resolve_log_path(Some(PathBuf::from("out.log")));
        assert_eq!(log_dir, PathBuf::from("."));
        assert_eq!(name, "out.log");
    }

    #[test]
    fn default_location() {
        let (log_dir, name) = resolve_log_path(None);
        assert!(log_dir.ends_with("stamp/logs"), "{}", log_dir.display());
        assert!(name.starts_with("stamp-"));
    }
}
