//! Optional `dotfiler.toml` settings file at the root of the source tree.
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// File name of the settings file inside the source directory.
pub const SETTINGS_FILE: &str = "dotfiler.toml";

/// Contents of `dotfiler.toml`.  Every key is optional.
///
/// ```toml
/// skip = ["README*", "scripts"]
/// backup = true
/// force = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    /// Extra skip patterns, merged with `--skip`.
    pub skip: Vec<String>,
    /// Default for backing up existing targets.
    pub backup: Option<bool>,
    /// Default for replacing existing links.
    pub force: Option<bool>,
}

/// Load the settings file from `source_root`.
///
/// A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load(source_root: &Path) -> Result<FileSettings, ConfigError> {
    let path = source_root.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(FileSettings::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::SettingsFile {
        path: path.clone(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::SettingsParse {
        path,
        message: e.message().to_string(),
    })
}
