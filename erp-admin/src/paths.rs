//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "erp";
const APPLICATION: &str = "erp-admin";

/// Maximum number of archived log files to keep.
const MAX_OLD_LOGS: usize = 25;

const LATEST_LOG: &str = "latest.log";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Cache directory for logs and other regenerable data.
///
/// - Linux: `$XDG_CACHE_HOME/erp-admin` or `~/.cache/erp-admin`
/// - macOS: `~/Library/Caches/com.erp.erp-admin`
/// - Windows: `C:\Users\<User>\AppData\Local\erp\erp-admin\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path of the log file for the current run.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Create `path` and any missing parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    File::create(path)
}

/// Archive the previous `latest.log` under a timestamped name and prune old logs.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    if let Some(cache) = cache_dir() {
        rotate_logs_in(&cache);
    }
}

pub(crate) fn rotate_logs_in(dir: &Path) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let _ = fs::rename(&latest, dir.join(format!("{}.log", timestamp)));
    }
    prune_logs(dir, MAX_OLD_LOGS);
}

/// Remove the oldest archived logs beyond `keep`.
fn prune_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }
    }
}
