//! TOML schema definitions for swift-format-plugin.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root structure for swift-format-plugin.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PluginToml {
    #[serde(default)]
    pub tool: ToolSection,

    #[serde(default)]
    pub invocation: InvocationSection,
}

/// `[tool]` section
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ToolSection {
    /// Executable name looked up on PATH (default: swift-format)
    pub name: Option<String>,

    /// Explicit executable path, skips the PATH lookup
    pub path: Option<PathBuf>,
}

/// `[invocation]` section
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct InvocationSection {
    /// Pass `--parallel` to swift-format (default: true)
    pub parallel: Option<bool>,

    /// Source file extension to collect (default: swift)
    pub extension: Option<String>,
}
