//! Progress indicators for downloads.
//!
//! Wraps `indicatif` with the styling and kill switch used across relsync.
//! Bars are disabled entirely when the `RELSYNC_NO_PROGRESS` environment
//! variable is set (CI, scripts, dumb terminals).
//!
//! Download bars redraw at most twice per second regardless of how fast
//! chunks arrive, so a fast link cannot flood the terminal, and they render
//! the completed percentage with two decimals on a single overwritten line.

use indicatif::{
    ProgressBar as IndicatifBar, ProgressDrawTarget, ProgressState,
    ProgressStyle as IndicatifStyle,
};
use std::fmt::Write;

use crate::constants::{NO_PROGRESS_ENV, PROGRESS_REDRAW_HZ};

/// Whether progress bars should be suppressed.
fn is_progress_disabled() -> bool {
    std::env::var(NO_PROGRESS_ENV).is_ok()
}

/// Progress display for one asset download.
#[derive(Clone)]
pub struct DownloadBar {
    inner: IndicatifBar,
}

impl DownloadBar {
    /// Create a bar for downloading `name`, expecting `total` bytes.
    ///
    /// The bar is hidden when progress is disabled; all other operations
    /// become no-ops in that case.
    #[must_use]
    pub fn new(name: &str, total: u64) -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::with_draw_target(
                Some(total),
                ProgressDrawTarget::stderr_with_hz(PROGRESS_REDRAW_HZ),
            );
            bar.set_style(download_style());
            bar
        };
        bar.set_message(name.to_string());
        Self { inner: bar }
    }

    /// Record `bytes` more bytes received.
    pub fn inc(&self, bytes: u64) {
        self.inner.inc(bytes);
    }

    /// Clear the progress line once the download completes.
    pub fn finish(&self) {
        self.inner.finish_and_clear();
    }
}

fn download_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("Downloading {msg}... {percent2}%")
        .unwrap()
        .with_key("percent2", |state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{:.2}", state.fraction() * 100.0);
        })
}
