//! # Sprout UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Terminal presentation helpers, kept apart from the logic they decorate.

/// Spinner shown around the template download.
pub mod progress;
