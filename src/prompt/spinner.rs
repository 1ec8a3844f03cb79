//! Spinner for long-running steps (listing, cloning)

use indicatif::{ProgressBar, ProgressStyle};
use std::borrow::Cow;
use std::time::Duration;

/// Spins on stderr until finished or dropped.
///
/// Nothing is drawn when stderr is not a terminal.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    pub fn start(msg: impl Into<Cow<'static, str>>) -> Self {
        let bar = ProgressBar::new_spinner().with_message(msg);
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg} {elapsed:.dim}") {
            bar.set_style(style.tick_chars("|/-\\ "));
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn finish(self) {}
}

impl Drop for ProgressSpinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
