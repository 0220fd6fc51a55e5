//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::Theme;
use super::SpinnerHandle;

/// A progress spinner for long-running installs.
///
/// When the spinner is hidden (no TTY, e.g. a batch job writing to a log),
/// finish messages are still printed as plain lines unless `echo` is off.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: Theme,
    echo: bool,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.magenta} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            bar,
            theme: Theme::detect(),
            echo: false,
        }
    }

    /// Create a spinner that doesn't animate.
    ///
    /// With `echo`, finish messages are written to stdout as lines.
    pub fn hidden(echo: bool) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: Theme::detect(),
            echo,
        }
    }

    fn finish(&mut self, line: String) {
        if self.bar.is_hidden() {
            if self.echo {
                println!("{}", line);
            }
            return;
        }
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish(line);
    }

    fn finish_skipped(&mut self, msg: &str) {
        let line = self.theme.format_skipped(msg);
        self.finish(line);
    }
}
