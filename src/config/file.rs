//! Settings file discovery and loading

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::toml_schema::PluginToml;

/// Name of the plugin's own settings file.
pub const SETTINGS_FILE_NAME: &str = "swift-format-plugin.toml";

/// Error type for settings loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the file
    #[error("failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// TOML parsing error
    #[error("failed to parse settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Search upward from `start_dir` for a file with the given name.
///
/// If `stop_at_git_root` is true, stops searching when a `.git` directory is found.
/// Returns `None` if the file is not found.
pub fn find_file_upward(
    start_dir: &Path,
    filename: &str,
    stop_at_git_root: bool,
) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let file_path = current.join(filename);
        if file_path.exists() {
            return Some(file_path);
        }

        if stop_at_git_root && current.join(".git").exists() {
            return None;
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Find swift-format-plugin.toml by searching upward from the package root.
///
/// Stops at the first match or at the git repository root, whichever comes first.
pub fn find_settings_file(start_dir: &Path) -> Option<PathBuf> {
    find_file_upward(start_dir, SETTINGS_FILE_NAME, true)
}

/// Load and parse a settings file.
pub fn load_settings(path: &Path) -> Result<PluginToml, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
