//! Human-facing summary lines.
//!
//! Diagnostics (remarks, warnings, errors) go through `tracing`; this module
//! only prints the start and completion lines of a manual run.

use std::io::{self, IsTerminal};

use crate::invocation::Mode;

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Normal,
    Quiet,
}

/// ANSI styling, switched off entirely when colors are disabled.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn failure(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    pub fn info(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

pub fn should_use_colors(force_color: bool, no_color: bool) -> bool {
    // Priority: --no-color > --color > NO_COLOR env > TTY detection
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    io::stdout().is_terminal()
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub palette: Palette,
    pub show_progress: bool,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool, show_progress: bool) -> Self {
        Self {
            mode,
            palette: Palette::new(use_colors),
            show_progress: show_progress && mode != OutputMode::Quiet,
        }
    }

    /// Plain, colorless, no spinner. Used by tests and non-interactive callers.
    pub fn plain() -> Self {
        Self::new(OutputMode::Normal, false, false)
    }
}

pub fn start_message(mode: Mode, file_count: usize, unit_count: usize) -> String {
    format!(
        "{} {} Swift files in {} target(s)...",
        mode.progressive(),
        file_count,
        unit_count
    )
}

pub fn success_message(mode: Mode) -> String {
    format!("✅ {} completed successfully!", mode.progressive())
}

pub fn print_start(mode: Mode, file_count: usize, unit_count: usize, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    println!(
        "{}",
        ctx.palette
            .info(&start_message(mode, file_count, unit_count))
    );
}

pub fn print_success(mode: Mode, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    println!("{}", ctx.palette.success(&success_message(mode)));
}

pub fn print_failure(message: &str, ctx: &OutputContext) {
    eprintln!("{}", ctx.palette.failure(message));
}
