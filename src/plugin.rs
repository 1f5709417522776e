//! Host entry points.
//!
//! [`create_build_commands`] is the build-integrated lint step: it only
//! describes the command and leaves scheduling to the build system.
//! [`perform_command`] is the manual lint/format step: it runs swift-format
//! right away and reports the outcome.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::{Settings, MISSING_CONFIGURATION_WARNING};
use crate::error::Result;
use crate::invocation::{InvocationOptions, InvocationSpec, Mode};
use crate::output::{self, OutputContext};
use crate::process::{locate_tool, relay_output, ToolRunner};
use crate::progress::ToolSpinner;
use crate::source::{select_units, SourceEnumerator};

pub const BUILD_COMMAND_DISPLAY_NAME: &str = "Running SwiftFormat Lint";

/// Everything a hook needs from its host.
pub struct PluginContext<'a> {
    pub enumerator: &'a dyn SourceEnumerator,
    pub tool_name: String,
    pub tool: PathBuf,
    /// Where deferred build commands may write outputs.
    pub work_dir: PathBuf,
    pub extension: String,
    pub options: InvocationOptions,
}

impl<'a> PluginContext<'a> {
    /// Resolve the tool from `settings`; a missing tool is fatal.
    pub fn new(enumerator: &'a dyn SourceEnumerator, settings: &Settings) -> Result<Self> {
        let tool = locate_tool(&settings.tool_name, settings.tool_path.as_deref())?;
        debug!("using {} at {}", settings.tool_name, tool.display());

        Ok(Self {
            work_dir: default_work_dir(enumerator.root()),
            enumerator,
            tool_name: settings.tool_name.clone(),
            tool,
            extension: settings.extension.clone(),
            options: settings.invocation,
        })
    }
}

pub fn default_work_dir(root: &Path) -> PathBuf {
    root.join(".build")
        .join("plugins")
        .join(env!("CARGO_PKG_NAME"))
}

/// A command the build system runs before compiling a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildCommand {
    pub display_name: String,
    pub executable: PathBuf,
    pub arguments: Vec<String>,
    /// Always present and empty: the tool gets no extra variables.
    pub environment: BTreeMap<String, String>,
    pub output_files_directory: PathBuf,
}

/// How a manual run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed,
    /// No source files in the selected units; the tool was not started.
    NothingToDo,
    /// None of the requested units exist.
    NoTargets,
    /// The tool exited non-zero (None if killed by signal).
    Failed { exit_code: Option<i32> },
}

impl CommandOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, CommandOutcome::Completed | CommandOutcome::NothingToDo)
    }
}

/// Build-integrated lint hook for one unit.
///
/// Returns no commands when the unit is unknown or has no matching sources.
pub fn create_build_commands(
    ctx: &PluginContext<'_>,
    unit_name: &str,
) -> Result<Vec<BuildCommand>> {
    let Some(unit) = ctx.enumerator.unit(unit_name)? else {
        debug!("'{unit_name}' is not a source unit");
        return Ok(vec![]);
    };

    let files = unit.source_files(&ctx.extension);
    info!("Linting {} Swift file(s)...", files.len());

    if files.is_empty() {
        return Ok(vec![]);
    }

    let configuration = ctx.enumerator.configuration();
    report_configuration(configuration.as_deref());

    let Some(spec) =
        InvocationSpec::build(Mode::Lint, &files, configuration.as_deref(), &ctx.options)
    else {
        return Ok(vec![]);
    };

    Ok(vec![BuildCommand {
        display_name: BUILD_COMMAND_DISPLAY_NAME.to_string(),
        executable: ctx.tool.clone(),
        arguments: spec.into_arguments(),
        environment: BTreeMap::new(),
        output_files_directory: ctx.work_dir.clone(),
    }])
}

/// Manual lint/format hook. No names means every unit.
pub fn perform_command<R>(
    ctx: &PluginContext<'_>,
    mode: Mode,
    unit_names: &[String],
    runner: &R,
    out: &OutputContext,
) -> Result<CommandOutcome>
where
    R: ToolRunner + ?Sized,
{
    let selection = select_units(ctx.enumerator, unit_names)?;

    for name in &selection.missing {
        warn!("Target '{name}' not found. Skipping.");
    }

    if selection.units.is_empty() {
        error!("No targets to {mode}.");
        return Ok(CommandOutcome::NoTargets);
    }

    let files: Vec<PathBuf> = selection
        .units
        .iter()
        .flat_map(|unit| unit.source_files(&ctx.extension))
        .collect();

    if files.is_empty() {
        warn!("No Swift files found to {mode}.");
        return Ok(CommandOutcome::NothingToDo);
    }

    let configuration = ctx.enumerator.configuration();
    report_configuration(configuration.as_deref());

    let Some(spec) = InvocationSpec::build(mode, &files, configuration.as_deref(), &ctx.options)
    else {
        return Ok(CommandOutcome::NothingToDo);
    };

    output::print_start(mode, spec.file_count(), selection.units.len(), out);

    let spinner = ToolSpinner::start(
        &format!("running {} {}", ctx.tool_name, mode),
        spec.file_count(),
        out.show_progress,
    );
    let result = runner.run(&ctx.tool, &spec);
    spinner.finish();
    let result = result?;

    relay_output(&result);

    if result.success() {
        output::print_success(mode, out);
        return Ok(CommandOutcome::Completed);
    }

    let message = match result.exit_code {
        Some(code) => format!("{} failed with exit code {code}", ctx.tool_name),
        None => format!("{} was terminated by a signal", ctx.tool_name),
    };
    error!("{message}");
    output::print_failure(&message, out);

    Ok(CommandOutcome::Failed {
        exit_code: result.exit_code,
    })
}

fn report_configuration(configuration: Option<&Path>) {
    match configuration {
        Some(path) => info!("Using swift-format configuration at {}", path.display()),
        None => warn!("{MISSING_CONFIGURATION_WARNING}"),
    }
}
