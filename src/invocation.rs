//! Argument assembly for swift-format

use std::fmt;
use std::path::{Path, PathBuf};

/// What swift-format is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Lint,
    Format,
}

impl Mode {
    pub fn subcommand(self) -> &'static str {
        match self {
            Mode::Lint => "lint",
            Mode::Format => "format",
        }
    }

    /// Used in progress and summary messages ("Linting 3 Swift files...").
    pub fn progressive(self) -> &'static str {
        match self {
            Mode::Lint => "Linting",
            Mode::Format => "Formatting",
        }
    }

    /// Format rewrites files, lint only reads them.
    pub fn modifies_files(self) -> bool {
        matches!(self, Mode::Format)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

/// Tunables applied to every invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationOptions {
    /// Pass `--parallel` (default: true)
    pub parallel: bool,
}

impl Default for InvocationOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Ordered argument list for one swift-format run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    file_count: usize,
    arguments: Vec<String>,
}

impl InvocationSpec {
    /// Assemble the arguments for `mode`.
    ///
    /// Returns `None` when `files` is empty: there is nothing to run and the
    /// caller must not spawn the tool. Files keep their order and duplicates
    /// are passed through as given.
    pub fn build(
        mode: Mode,
        files: &[PathBuf],
        configuration: Option<&Path>,
        options: &InvocationOptions,
    ) -> Option<Self> {
        if files.is_empty() {
            return None;
        }

        let mut arguments = vec![mode.subcommand().to_string()];

        if mode.modifies_files() {
            arguments.push("--in-place".to_string());
        }
        if options.parallel {
            arguments.push("--parallel".to_string());
        }

        // Flag and value are pushed together or not at all.
        if let Some(path) = configuration {
            arguments.push("--configuration".to_string());
            arguments.push(path_argument(path));
        }

        arguments.extend(files.iter().map(|f| path_argument(f)));

        Some(Self {
            file_count: files.len(),
            arguments,
        })
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn into_arguments(self) -> Vec<String> {
        self.arguments
    }
}

fn path_argument(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
