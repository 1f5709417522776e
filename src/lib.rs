pub mod config;
pub mod error;
pub mod invocation;
pub mod output;
pub mod plugin;
pub mod process;
pub mod progress;
pub mod source;

pub use config::{
    find_settings_file, generate_settings_file, load_settings, merge_settings,
    resolve_configuration, resolve_from_inputs, CliSettings, ConfigError, PluginToml, Settings,
    MISSING_CONFIGURATION_WARNING, PRIMARY_CONFIG_FILE, SECONDARY_CONFIG_FILE,
};
pub use error::{PluginError, Result};
pub use invocation::{InvocationOptions, InvocationSpec, Mode};
pub use output::{should_use_colors, OutputContext, OutputMode};
pub use plugin::{
    create_build_commands, perform_command, BuildCommand, CommandOutcome, PluginContext,
};
pub use process::{locate_tool, InvocationResult, SystemRunner, ToolRunner};
pub use source::{FileList, PackageGraph, SourceEnumerator, Unit};
