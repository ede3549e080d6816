//! # Sprout Progress Spinner
//!
//! File: cli/src/common/ui/progress.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! A small wrapper around `indicatif` for the download spinner. Callers get
//! a ticking spinner with a message and finish it with a success or failure
//! glyph; everything renders on stderr so piped stdout stays clean.
//!
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Creates a ticking spinner with the given message.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

/// Stops the spinner, leaving a success line.
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✔ {message}"));
}

/// Stops the spinner, leaving a failure line.
pub fn finish_failure(pb: &ProgressBar, message: &str) {
    pb.abandon_with_message(format!("× {message}"));
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    /// The spinner helpers must not panic in non-terminal environments
    /// (indicatif falls back to a hidden draw target).
    #[test]
    fn test_spinner_lifecycle() {
        let pb = spinner("downloading");
        assert!(!pb.is_finished());
        finish_success(&pb, "downloaded");
        assert!(pb.is_finished());

        let pb = spinner("downloading");
        finish_failure(&pb, "download failed");
        assert!(pb.is_finished());
    }
}
