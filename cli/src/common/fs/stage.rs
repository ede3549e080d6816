//! # Sprout Destination Stager
//!
//! File: cli/src/common/fs/stage.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Safely displaces the contents of a destination directory before a
//! scaffolding action runs against it, and restores them afterwards.
//! `stash_files` moves every top-level entry of the destination into a
//! staging area under the caller-supplied base directory, leaving the
//! destination empty; `unstash_files` moves them back, reconciling with
//! whatever the scaffolding action has since written. The two operations
//! must be used as a matched pair around a single scaffolding action.
//!
//! ## Architecture
//!
//! - The staging area is a directory with the fixed name [`STAGING_DIR_NAME`]
//!   directly under the base directory. It is created at the start of
//!   `stash_files` (any stale one from a crashed prior run is deleted first)
//!   and no longer exists once `unstash_files` returns.
//! - One file is special: [`RESERVED_CONFIG_NAME`], the template's own
//!   config file. It is stashed like everything else but never restored;
//!   `unstash_files` discards it.
//! - Entries are processed strictly one at a time in filesystem enumeration
//!   order. There is no transactional rollback: a copy or read failure
//!   aborts the remaining iterations and the caller must treat the
//!   destination and staging area as needing manual recovery.
//! - The staging path is fixed and unscoped, so the caller owns both
//!   directories exclusively for the duration of one stash/unstash cycle;
//!   concurrent invocations against the same base directory would corrupt
//!   each other.
//!
//! The base directory is always passed in by the caller (in practice the
//! per-user cache root resolved by `core::config`); this module never
//! consults the environment.
//!
use crate::common::fs::{copy, remove};
use crate::core::error::Result;
use anyhow::Context;
use std::{fs, path::Path};
use tracing::{debug, info};

/// Name of the staging directory created under the base directory.
pub const STAGING_DIR_NAME: &str = "tmp";

/// The template config filename that is never restored by `unstash_files`.
pub const RESERVED_CONFIG_NAME: &str = "sprout.json";

/// Moves every top-level entry of `dest` into the staging area under
/// `base_dir`, leaving `dest` empty.
///
/// A stale staging area from a crashed prior run is removed first; the
/// fresh one ends up holding an exact copy of what `dest` held. Copy and
/// delete of a single entry are two separate filesystem operations, so a
/// crash mid-entry can leave that one entry duplicated.
pub async fn stash_files(base_dir: &Path, dest: &Path) -> Result<()> {
    let staging_dir = base_dir.join(STAGING_DIR_NAME);
    info!("Stashing contents of {:?} into {:?}", dest, staging_dir);

    // Clear any leftover staging area; "not found" is fine, anything else
    // is fatal.
    remove::remove_dir_all_idempotent(&staging_dir)?;
    fs::create_dir_all(&staging_dir)
        .with_context(|| format!("Failed to create staging directory {:?}", staging_dir))?;

    let entries = fs::read_dir(dest)
        .with_context(|| format!("Failed to read destination directory {:?}", dest))?;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read an entry of {:?}", dest))?;
        let path = entry.path();
        let target = staging_dir.join(entry.file_name());
        let is_dir = entry
            .file_type()
            .with_context(|| format!("Failed to determine type of {:?}", path))?
            .is_dir();

        debug!("Stashing entry {:?}", path);
        if is_dir {
            copy::copy_directory_recursive(&path, &target)?;
            remove::remove_dir_all_idempotent(&path)?;
        } else {
            fs::copy(&path, &target)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, target))?;
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {:?}", path))?;
        }
    }

    Ok(())
}

/// Moves the staging area's contents back into `dest`, then deletes the
/// staging area.
///
/// Directories are copied back unconditionally and left in the staging area
/// until the final cleanup; files are copied back unless named
/// [`RESERVED_CONFIG_NAME`] (which is discarded) and removed from the
/// staging area one by one. Afterwards the staging area no longer exists.
pub async fn unstash_files(base_dir: &Path, dest: &Path) -> Result<()> {
    let staging_dir = base_dir.join(STAGING_DIR_NAME);
    info!("Restoring stashed contents from {:?} to {:?}", staging_dir, dest);

    let entries = fs::read_dir(&staging_dir)
        .with_context(|| format!("Failed to read staging directory {:?}", staging_dir))?;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read an entry of {:?}", staging_dir))?;
        let name = entry.file_name();
        let staged = entry.path();
        let target = dest.join(&name);
        let is_dir = entry
            .file_type()
            .with_context(|| format!("Failed to determine type of {:?}", staged))?
            .is_dir();

        if is_dir {
            debug!("Restoring directory {:?}", staged);
            copy::copy_directory_recursive(&staged, &target)?;
            // Left in the staging area; the final cleanup below removes it.
        } else {
            if name == RESERVED_CONFIG_NAME {
                debug!("Discarding reserved config file {:?}", staged);
            } else {
                debug!("Restoring file {:?}", staged);
                fs::copy(&staged, &target)
                    .with_context(|| format!("Failed to copy {:?} to {:?}", staged, target))?;
            }
            fs::remove_file(&staged)
                .with_context(|| format!("Failed to remove {:?}", staged))?;
        }
    }

    remove::remove_dir_all_idempotent(&staging_dir)
}
