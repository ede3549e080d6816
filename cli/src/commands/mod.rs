//! # Sprout Commands Module (`commands`)
//!
//! File: cli/src/commands/mod.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! One module per top-level command. Each exposes an `Args` struct parsed
//! by clap and an async `handle_*` function called from `main`.

/// The `sprout cache` command group (clear, status).
pub mod cache;
/// The `sprout new` command: scaffold a project from a remote template.
pub mod new;
