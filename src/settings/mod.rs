//! User settings loaded from `settings.conf`.

use std::fs;
use std::path::Path;

use crate::matrix::MatrixRules;

mod parse;
mod paths;

pub use parse::{parse_key_value, parse_settings, skip_comment_or_empty};
pub use paths::{config_dir, logs_dir, resolve_settings_path};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Runtime settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Grouping, tag extraction and classification rules.
    pub rules: MatrixRules,
    /// Whether table output is colored by tier.
    pub color_output: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules: MatrixRules::default(),
            color_output: true,
        }
    }
}

impl Settings {
    /// What: Load settings from an explicit file.
    ///
    /// Inputs:
    /// - `path`: Settings file to read.
    ///
    /// Output:
    /// - Defaults overlaid with the file's entries.
    ///
    /// # Errors
    /// Fails when the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("failed to read settings {}: {e}", path.display()))?;
        let mut settings = Self::default();
        parse_settings(&content, &mut settings);
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// What: Load settings from `explicit` or the default search locations.
    ///
    /// Inputs:
    /// - `explicit`: Path given on the command line, if any.
    ///
    /// Output:
    /// - Loaded settings; defaults when no file exists.
    ///
    /// # Errors
    /// Fails only when `explicit` is given and cannot be read. An unreadable
    /// default file is logged and ignored.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let Some(path) = resolve_settings_path() else {
            tracing::debug!("no settings file found; using defaults");
            return Ok(Self::default());
        };
        Ok(Self::from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable settings file");
            Self::default()
        }))
    }
}
