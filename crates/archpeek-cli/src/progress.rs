//! Progress spinner implementation for CLI inspections.

use archpeek_core::ProgressCallback;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::time::Duration;

/// CLI spinner wrapper implementing `ProgressCallback`.
///
/// Archive listings are streamed, so the entry total is unknown up front;
/// the spinner shows a running count and the most recent entry instead.
/// Automatically cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
    entries: u64,
}

impl CliProgress {
    /// Creates a new spinner with the given message prefix.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();

        // Template: "⠋ Inspecting 42 entries: docs/readme.txt"
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {prefix} {pos} entries: {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_prefix(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar, entries: 0 }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry(&mut self, path: &str, is_directory: bool) {
        self.entries += 1;
        self.bar.set_position(self.entries);
        if is_directory {
            self.bar.set_message(format!("{path}/"));
        } else {
            self.bar.set_message(path.to_string());
        }
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}
