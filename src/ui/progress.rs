//! Spinner shown while external steps run

use super::context::UiContext;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A task spinner that draws nothing outside interactive terminals
pub struct TaskSpinner {
    bar: Option<ProgressBar>,
}

impl TaskSpinner {
    /// Create a spinner; hidden unless `ctx` allows fancy output
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            bar: ctx.use_fancy_output().then(create_spinner),
        }
    }

    /// Start or update the spinner message
    pub fn start(&mut self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(100));
        }
    }

    /// Clear the spinner without any message
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for TaskSpinner {
    fn drop(&mut self) {
        self.clear();
    }
}

fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb
}
