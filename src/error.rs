//! Error types for plugin operations.
//!
//! Only fatal conditions live here. Missing configuration, unmatched unit
//! names and empty source sets are reported as diagnostics instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum PluginError {
    /// The external executable could not be located.
    #[error("tool '{name}' not found{}", searched_hint(.searched))]
    ToolNotFound {
        name: String,
        searched: Option<PathBuf>,
    },

    /// The executable exists but could not be started.
    #[error("failed to launch {}: {source}", .executable.display())]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn searched_hint(searched: &Option<PathBuf>) -> String {
    match searched {
        Some(path) => format!(" at {}", path.display()),
        None => " on PATH".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, PluginError>;
