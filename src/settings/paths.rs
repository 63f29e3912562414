//! Config and log directory resolution.

use std::env;
use std::path::{Path, PathBuf};

/// Directory name under the user's config base.
const APP_DIR: &str = "vermatrix";

/// What: Locate an existing `settings.conf`, searching in priority order.
///
/// Inputs:
/// - None (reads `HOME` and `XDG_CONFIG_HOME`).
///
/// Output:
/// - `Some(path)` of the first existing file; `None` otherwise.
///
/// Details:
/// - Checks `$HOME/.config/vermatrix/settings.conf` first, then
///   `$XDG_CONFIG_HOME/vermatrix/settings.conf`.
#[must_use]
pub fn resolve_settings_path() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(h) = env::var("HOME") {
        candidates.push(
            Path::new(&h)
                .join(".config")
                .join(APP_DIR)
                .join("settings.conf"),
        );
    }
    if let Ok(x) = env::var("XDG_CONFIG_HOME")
        && !x.trim().is_empty()
    {
        candidates.push(Path::new(&x).join(APP_DIR).join("settings.conf"));
    }
    candidates.into_iter().find(|p| p.is_file())
}

/// Resolve an XDG base directory from `var`, or `$HOME` joined with `home_default`.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    home_default
        .iter()
        .fold(PathBuf::from(home), |base, seg| base.join(seg))
}

/// Config directory (`$HOME/.config/vermatrix` or the XDG equivalent), created if missing.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join(APP_DIR);
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    let dir = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR);
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under the config directory, created if missing.
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}
