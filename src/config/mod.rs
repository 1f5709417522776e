//! Configuration support.
//!
//! This module provides:
//! - Discovery of the swift-format configuration (`.swiftformat` / `.swift-format`)
//! - Loading the runner's own `swift-format-plugin.toml`
//! - Merging CLI args, settings file, and defaults
//! - Template generation with `init`

mod file;
mod init;
mod merge;
mod resolve;
mod toml_schema;

pub use file::{
    find_file_upward, find_settings_file, load_settings, ConfigError, SETTINGS_FILE_NAME,
};
pub use init::{generate_settings_file, SETTINGS_TEMPLATE};
pub use merge::{merge_settings, CliSettings, Settings, DEFAULT_EXTENSION, DEFAULT_TOOL_NAME};
pub use resolve::{
    resolve_configuration, resolve_from_inputs, CONFIG_FILE_NAMES, MISSING_CONFIGURATION_WARNING,
    PRIMARY_CONFIG_FILE, SECONDARY_CONFIG_FILE,
};
pub use toml_schema::{InvocationSection, PluginToml, ToolSection};
