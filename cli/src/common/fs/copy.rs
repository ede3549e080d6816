//! # Sprout Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Recursive directory copying for the destination stager, built on the
//! `fs_extra` crate.
//!
//! ## Semantics
//!
//! `copy_directory_recursive(source, target)` makes `target` a copy of
//! `source`: the target directory is created if absent and each top-level
//! entry of the source is copied beneath it, recursing into
//! subdirectories and overwriting files that already exist. The stager
//! depends on that shape: staging `dest/foo` must produce `staging/foo`,
//! not `staging/foo/foo`, and restoring into a freshly scaffolded
//! destination must merge rather than fail.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::{fs, path::Path};
use tracing::debug;

/// Copies a directory recursively so that `target` becomes a copy of
/// `source`.
///
/// The target directory (and any needed parents) is created if absent, and
/// files already present under it are overwritten.
///
/// # Errors
///
/// Returns an `Err` if the source cannot be read or any file cannot be
/// written, wrapped with context naming both paths.
pub fn copy_directory_recursive(source: &Path, target: &Path) -> Result<()> {
    debug!("Recursive copy from {:?} to {:?}", source, target);

    fs::create_dir_all(target)
        .with_context(|| format!("Failed to create directory {:?}", target))?;

    let mut entries = Vec::new();
    let read_dir = fs::read_dir(source)
        .with_context(|| format!("Failed to read source directory {:?}", source))?;
    for entry in read_dir {
        let entry = entry
            .with_context(|| format!("Failed to read an entry of {:?}", source))?;
        entries.push(entry.path());
    }

    let mut options = fs_extra::dir::CopyOptions::new();
    // Overwrite files already present at the target.
    options.overwrite = true;

    fs_extra::copy_items(&entries, target, &options)
        .map_err(|e| {
            anyhow::anyhow!(e)
                .context(format!("Failed to copy dir {:?} to {:?}", source, target))
        })?;

    Ok(())
}
