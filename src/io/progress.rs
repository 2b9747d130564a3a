//! Attempt and rendering progress display

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::io::error::GenerationError;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use tracing::warn;

static GENERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{prefix}}] Generating ({{pos}}/{{len}}) [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{percent}}% {{eta}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static SAVING_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "Saving results ({{pos}}/{{len}}) [{{bar:{PROGRESS_BAR_WIDTH}.green/blue}}] {{percent}}% {{eta}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display for generation attempts and rendering
///
/// Each attempt gets its own bar, abandoned in place when the attempt fails so
/// the history of retries stays visible.
#[derive(Default)]
pub struct ProgressManager {
    attempt_bar: Option<ProgressBar>,
    saving_bar: Option<ProgressBar>,
}

impl ProgressManager {
    /// Create a progress manager with no active bars
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a bar for a new attempt
    pub fn start_attempt(&mut self, attempt: usize, supply: usize) {
        if let Some(previous) = self.attempt_bar.take() {
            previous.abandon();
        }
        let bar = ProgressBar::new(supply as u64);
        bar.set_style(GENERATION_STYLE.clone());
        bar.set_prefix(attempt.to_string());
        self.attempt_bar = Some(bar);
    }

    /// Report members accepted so far in the current attempt
    pub fn member_accepted(&self, accepted: usize) {
        if let Some(ref bar) = self.attempt_bar {
            bar.set_position(accepted as u64);
        }
    }

    /// Leave the current attempt's bar where it stopped and report why
    ///
    /// The warning is written while the bar is suspended so the line lands
    /// above it instead of inside the redraw.
    pub fn fail_attempt(&mut self, attempt: usize, error: &GenerationError) {
        match self.attempt_bar.take() {
            Some(bar) => {
                bar.suspend(|| warn!(attempt, error = %error, "attempt failed"));
                bar.abandon();
            }
            None => warn!(attempt, error = %error, "attempt failed"),
        }
    }

    /// Close the successful attempt's bar
    pub fn finish_generation(&mut self) {
        if let Some(bar) = self.attempt_bar.take() {
            bar.finish();
        }
    }

    /// Open the rendering bar
    pub fn start_saving(&mut self, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(SAVING_STYLE.clone());
        self.saving_bar = Some(bar);
    }

    /// Count one saved member; callable from worker threads
    pub fn member_saved(&self) {
        if let Some(ref bar) = self.saving_bar {
            bar.inc(1);
        }
    }

    /// Current position of the attempt bar
    pub fn attempt_position(&self) -> Option<u64> {
        self.attempt_bar.as_ref().map(ProgressBar::position)
    }

    /// Current position of the rendering bar
    pub fn saved_count(&self) -> Option<u64> {
        self.saving_bar.as_ref().map(ProgressBar::position)
    }

    /// Clean up all progress displays
    pub fn finish(&mut self) {
        self.finish_generation();
        if let Some(bar) = self.saving_bar.take() {
            bar.finish();
        }
    }
}
