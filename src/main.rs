use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use swift_format_plugin::{
    create_build_commands, find_settings_file, generate_settings_file, load_settings,
    merge_settings, perform_command, should_use_colors, CliSettings, FileList, Mode,
    ConfigError, OutputContext, OutputMode, PackageGraph, PluginContext, PluginToml,
    SourceEnumerator, SystemRunner,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Unit name used for `--files-from` lists in manual runs.
const FILE_LIST_UNIT: &str = "inputs";

#[derive(Parser, Debug)]
#[command(name = "swift-format-plugin")]
#[command(version, about = "Run swift-format over the Swift sources of a package")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Package root (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    package_path: Option<PathBuf>,

    /// Settings file (overrides discovery of swift-format-plugin.toml)
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// swift-format executable (overrides PATH lookup)
    #[arg(long, global = true, value_name = "PATH")]
    tool: Option<PathBuf>,

    /// Do not pass --parallel to swift-format
    #[arg(long, global = true)]
    no_parallel: bool,

    /// Read input files from a list (one path per line) instead of the package layout.
    /// The list forms a single target named "inputs".
    #[arg(long, global = true, value_name = "FILE")]
    files_from: Option<PathBuf>,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Force colored output
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lint the given targets (all targets when none are given)
    Lint { targets: Vec<String> },

    /// Format the given targets in place (all targets when none are given)
    Format { targets: Vec<String> },

    /// Print the lint command the build system should run for a target, as JSON
    BuildCommands { target: String },

    /// Generate a template swift-format-plugin.toml in the package root
    Init,
}

/// Log level is controlled by:
/// 1. `--debug` sets level to DEBUG
/// 2. `--quiet` sets level to WARN
/// 3. `RUST_LOG` environment variable (if set)
/// 4. Default is INFO
fn init_tracing(debug: bool, quiet: bool) {
    let filter = if debug {
        EnvFilter::new("swift_format_plugin=debug")
    } else if quiet {
        EnvFilter::new("swift_format_plugin=warn")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("swift_format_plugin=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.quiet);

    tracing::debug!("starting with args: {:?}", cli);

    let root = match package_root(cli.package_path.as_deref()) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if let Commands::Init = cli.command {
        return handle_init(&root);
    }

    match run(&cli, &root) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli, root: &Path) -> swift_format_plugin::Result<bool> {
    let toml = load_configuration(cli.settings.as_deref(), root)?;
    let cli_settings = CliSettings {
        tool_path: cli.tool.clone(),
        no_parallel: cli.no_parallel.then_some(true),
    };
    let settings = merge_settings(&cli_settings, toml.as_ref());

    let enumerator: Box<dyn SourceEnumerator> = match &cli.files_from {
        Some(list) => {
            let name = match &cli.command {
                Commands::BuildCommands { target } => target.as_str(),
                _ => FILE_LIST_UNIT,
            };
            Box::new(FileList::read_from(root, name, list)?)
        }
        None => Box::new(PackageGraph::new(root)),
    };

    let ctx = PluginContext::new(enumerator.as_ref(), &settings)?;

    match &cli.command {
        Commands::BuildCommands { target } => {
            let commands = create_build_commands(&ctx, target)?;
            let json = serde_json::to_string_pretty(&commands).map_err(io::Error::other)?;
            println!("{json}");
            Ok(true)
        }
        Commands::Lint { targets } => manual(cli, &ctx, Mode::Lint, targets),
        Commands::Format { targets } => manual(cli, &ctx, Mode::Format, targets),
        Commands::Init => Ok(true),
    }
}

fn manual(
    cli: &Cli,
    ctx: &PluginContext<'_>,
    mode: Mode,
    targets: &[String],
) -> swift_format_plugin::Result<bool> {
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let out = OutputContext::new(
        output_mode,
        should_use_colors(cli.color, cli.no_color),
        io::stderr().is_terminal(),
    );

    let runner = SystemRunner {
        environment: None,
        cwd: Some(ctx.enumerator.root().to_path_buf()),
    };
    let outcome = perform_command(ctx, mode, targets, &runner, &out)?;
    Ok(outcome.is_success())
}

fn package_root(explicit: Option<&Path>) -> io::Result<PathBuf> {
    let root = match explicit {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };
    // Arguments handed to swift-format are absolute.
    std::path::absolute(root)
}

fn handle_init(root: &Path) -> ExitCode {
    match generate_settings_file(root) {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// An explicit `--settings` file must load; a discovered one only warns on failure.
fn load_configuration(
    explicit_path: Option<&Path>,
    root: &Path,
) -> Result<Option<PluginToml>, ConfigError> {
    if let Some(path) = explicit_path {
        let settings = load_settings(path)?;
        tracing::debug!("using settings from {}", path.display());
        return Ok(Some(settings));
    }

    let Some(path) = find_settings_file(root) else {
        return Ok(None);
    };

    match load_settings(&path) {
        Ok(settings) => {
            tracing::debug!("using settings from {}", path.display());
            Ok(Some(settings))
        }
        Err(e) => {
            tracing::warn!("{e}; falling back to defaults");
            Ok(None)
        }
    }
}
