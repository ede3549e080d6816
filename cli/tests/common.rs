//! # Sprout CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Shared helpers for the integration tests. Each test file declares this
//! module and drives the compiled binary through `assert_cmd`.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;

/// Creates an `assert_cmd::Command` pointing at the compiled `sprout`
/// binary for the current test run.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn sprout_cmd() -> Command {
    Command::cargo_bin("sprout").expect("Failed to find sprout binary for testing")
}

/// Creates a `sprout` command whose cache is redirected into `cache_dir`
/// via the `SPROUT_CACHE_DIR` override, keeping tests away from the real
/// per-user cache.
pub fn sprout_cmd_with_cache(cache_dir: &std::path::Path) -> Command {
    let mut cmd = sprout_cmd();
    cmd.env("SPROUT_CACHE_DIR", cache_dir);
    cmd
}
