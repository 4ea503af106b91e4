use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Root of per-user state under `home`: `<home>/.sales-dashboard/`.
pub fn app_dir_in(home: &Path) -> PathBuf {
    home.join(".sales-dashboard")
}

/// Ensure `~/.sales-dashboard/` and its `logs/` subdirectory exist.
pub fn ensure_directories() -> anyhow::Result<()> {
    ensure_directories_in(&home_dir())
}

pub fn ensure_directories_in(home: &Path) -> anyhow::Result<()> {
    let dir = app_dir_in(home);
    std::fs::create_dir_all(&dir)?;
    std::fs::create_dir_all(dir.join("logs"))?;
    Ok(())
}

/// Where logs go: the explicit file, else the default log file for the
/// interactive dashboard, else stderr (`None`).
pub fn resolve_log_file(view: &str, log_file: Option<&Path>) -> Option<PathBuf> {
    resolve_log_file_in(&home_dir(), view, log_file)
}

pub fn resolve_log_file_in(home: &Path, view: &str, log_file: Option<&Path>) -> Option<PathBuf> {
    match log_file {
        Some(path) => Some(path.to_path_buf()),
        None if view == "dashboard" => {
            Some(app_dir_in(home).join("logs").join("sales-dashboard.log"))
        }
        None => None,
    }
}

/// Map a `--log-level` value to an `EnvFilter` directive.
pub fn level_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" | "WARN" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `RUST_LOG`, when set, takes precedence over `log_level`.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(log_level)));

    let (writer, ansi) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(ansi)
        .with_writer(writer);

    tracing_subscriber::registry().with(filter).with(layer).init();

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        ensure_directories_in(tmp.path()).expect("ensure_directories should succeed");

        let dir = tmp.path().join(".sales-dashboard");
        assert!(dir.is_dir(), ".sales-dashboard dir must exist");
        assert!(dir.join("logs").is_dir(), "logs subdir must exist");
    }

    #[test]
    fn test_ensure_directories_is_idempotent() {
        let tmp = TempDir::new().expect("tempdir");
        ensure_directories_in(tmp.path()).expect("first");
        ensure_directories_in(tmp.path()).expect("second");
        assert!(tmp.path().join(".sales-dashboard").join("logs").is_dir());
    }

    #[test]
    fn test_resolve_log_file_explicit_wins() {
        let home = PathBuf::from("/home/someone");
        let explicit = PathBuf::from("/tmp/custom.log");
        assert_eq!(
            resolve_log_file_in(&home, "dashboard", Some(&explicit)),
            Some(explicit.clone())
        );
        assert_eq!(
            resolve_log_file_in(&home, "process", Some(&explicit)),
            Some(explicit)
        );
    }

    #[test]
    fn test_resolve_log_file_dashboard_default() {
        let home = PathBuf::from("/home/someone");
        assert_eq!(
            resolve_log_file_in(&home, "dashboard", None),
            Some(PathBuf::from("/home/someone/.sales-dashboard/logs/sales-dashboard.log"))
        );
    }

    #[test]
    fn test_resolve_log_file_batch_views_use_stderr() {
        let home = PathBuf::from("/home/someone");
        assert_eq!(resolve_log_file_in(&home, "process", None), None);
        assert_eq!(resolve_log_file_in(&home, "summary", None), None);
    }

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("INFO"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("error"), "error");
        assert_eq!(level_directive("bogus"), "info");
    }
}
