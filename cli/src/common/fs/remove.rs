//! # Sprout Filesystem Removal Operations
//!
//! File: cli/src/common/fs/remove.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Recursive deletion with "already absent" treated as success. Both the
//! destination stager (clearing a stale staging area, discarding displaced
//! entries) and the cache commands rely on this being safe to call without
//! checking for existence first.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::{fs, io, path::Path};
use tracing::debug;

/// Deletes a directory tree, succeeding if the path does not exist.
///
/// Only genuine I/O failures propagate; a missing target is a no-op. The
/// deletion is irreversible.
pub fn remove_dir_all_idempotent(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            debug!("Removed directory tree: {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Directory already absent, nothing to remove: {:?}", path);
            Ok(())
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to remove directory {:?}", path))
        }
    }
}
