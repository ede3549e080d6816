//! # Sprout Core Infrastructure (`core`)
//!
//! File: cli/src/core/mod.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Groups the foundational pieces the rest of the application builds on:
//! error types, configuration loading, and template source parsing. Nothing
//! in here performs network or destructive filesystem work; that lives in
//! `common` and is orchestrated by `commands`.

/// Configuration file loading and cache path resolution.
pub mod config;
/// Error enum and the shared `Result` alias.
pub mod error;
/// Template specifier parsing and per-host URL construction.
pub mod source;
