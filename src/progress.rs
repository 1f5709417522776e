use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Below this many files swift-format finishes too fast for a spinner to help.
const SPINNER_THRESHOLD: usize = 10;

/// Spinner shown on stderr while the tool runs.
pub struct ToolSpinner {
    bar: Option<ProgressBar>,
}

impl ToolSpinner {
    pub fn start(message: &str, file_count: usize, enabled: bool) -> Self {
        if !enabled || file_count < SPINNER_THRESHOLD {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
