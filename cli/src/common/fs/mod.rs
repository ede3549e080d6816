//! # Sprout Filesystem Utilities Module (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Shared filesystem building blocks: recursive copy, idempotent recursive
//! delete, and the destination stager built on top of both.

/// Recursive directory copying (`target` becomes a copy of `source`).
pub mod copy;
/// Recursive deletion that treats "already absent" as success.
pub mod remove;
/// Stash/unstash of a destination directory around a scaffolding action.
pub mod stage;
