//! Settings merging logic
//!
//! Priority: CLI args > swift-format-plugin.toml > defaults

use std::path::PathBuf;

use crate::invocation::InvocationOptions;

use super::toml_schema::PluginToml;

pub const DEFAULT_TOOL_NAME: &str = "swift-format";
pub const DEFAULT_EXTENSION: &str = "swift";

/// CLI options that can override settings file values.
///
/// Uses `Option<T>` to distinguish "not specified" from "explicitly set".
#[derive(Debug, Default)]
pub struct CliSettings {
    pub tool_path: Option<PathBuf>,
    /// If Some(true), drop `--parallel` (inverted in settings)
    pub no_parallel: Option<bool>,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tool_name: String,
    pub tool_path: Option<PathBuf>,
    pub extension: String,
    pub invocation: InvocationOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            tool_path: None,
            extension: DEFAULT_EXTENSION.to_string(),
            invocation: InvocationOptions::default(),
        }
    }
}

/// Merge settings from CLI, TOML, and defaults.
pub fn merge_settings(cli: &CliSettings, toml: Option<&PluginToml>) -> Settings {
    let defaults = Settings::default();

    Settings {
        tool_name: toml
            .and_then(|t| t.tool.name.clone())
            .unwrap_or(defaults.tool_name),
        tool_path: cli
            .tool_path
            .clone()
            .or_else(|| toml.and_then(|t| t.tool.path.clone()))
            .or(defaults.tool_path),
        extension: toml
            .and_then(|t| t.invocation.extension.clone())
            .map(|ext| ext.trim_start_matches('.').to_string())
            .unwrap_or(defaults.extension),
        invocation: InvocationOptions {
            parallel: cli
                .no_parallel
                .map(|no| !no)
                .or_else(|| toml.and_then(|t| t.invocation.parallel))
                .unwrap_or(defaults.invocation.parallel),
        },
    }
}
