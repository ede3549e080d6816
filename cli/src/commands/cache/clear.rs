//! # Sprout Cache Clear Command
//!
//! File: cli/src/commands/cache/clear.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Deletes the entire download cache. Cached archives are only ever a
//! convenience, so this is always safe; the next `sprout new` simply
//! downloads again. Clearing an absent cache succeeds quietly.
//!
use crate::common::fs::remove;
use crate::core::{config, error::Result};
use anyhow::Context;
use clap::Parser;
use tracing::info;

/// Arguments for `sprout cache clear` (none).
#[derive(Parser, Debug)]
pub struct ClearArgs {}

/// Handler for `sprout cache clear`.
pub async fn handle_clear(_args: ClearArgs) -> Result<()> {
    let cfg = config::load_config().context("Failed to load sprout configuration")?;
    let cache_dir = cfg.cache_dir();

    info!("Clearing cache at {:?}", cache_dir);
    remove::remove_dir_all_idempotent(&cache_dir)?;

    println!("Cleared cache at '{}'.", cache_dir.display());
    Ok(())
}
