//! # Sprout Common Utilities Module (`common`)
//!
//! File: cli/src/common/mod.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Shared infrastructure used by the command handlers: archive extraction,
//! filesystem staging/copy/delete primitives, the HTTP fetcher, external
//! process execution, and terminal progress display. Modules here do not
//! parse arguments or decide policy; `commands` orchestrates them.

/// Tarball extraction for downloaded templates.
pub mod archive;
/// Filesystem copy, idempotent delete, and the destination stager.
pub mod fs;
/// HTTP download with bounded redirect chasing and proxy support.
pub mod net;
/// External command execution with captured output.
pub mod process;
/// Terminal progress display.
pub mod ui;
