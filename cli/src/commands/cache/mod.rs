//! # Sprout Cache Command Group (`commands::cache`)
//!
//! File: cli/src/commands/cache/mod.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! The `sprout cache` command group manages the per-user download cache
//! where template tarballs are stored between runs. Two subcommands:
//! `clear` deletes the whole cache, `status` reports what it holds.
//!
use crate::core::error::Result;
use clap::{Parser, Subcommand};

mod clear;
mod status;

/// Arguments for the `sprout cache` command group.
#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    command: CacheCommand,
}

/// The subcommands available under `sprout cache`.
#[derive(Subcommand, Debug)]
enum CacheCommand {
    /// Delete the entire download cache.
    Clear(clear::ClearArgs),
    /// Report the cache location, archive count, and total size.
    Status(status::StatusArgs),
}

/// Dispatches to the selected cache subcommand.
pub async fn handle_cache(args: CacheArgs) -> Result<()> {
    match args.command {
        CacheCommand::Clear(args) => clear::handle_clear(args).await?,
        CacheCommand::Status(args) => status::handle_status(args).await?,
    }
    Ok(())
}
