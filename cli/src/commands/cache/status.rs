//! # Sprout Cache Status Command
//!
//! File: cli/src/commands/cache/status.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Walks the download cache and reports its location, how many template
//! archives it holds, and their combined size. Staging directories left by
//! an interrupted run also show up in the size, which is exactly the kind
//! of debris the user wants to know about before `cache clear`.
//!
use crate::core::{config, error::Result};
use anyhow::Context;
use clap::Parser;
use std::path::Path;
use walkdir::WalkDir;

/// Arguments for `sprout cache status` (none).
#[derive(Parser, Debug)]
pub struct StatusArgs {}

/// Handler for `sprout cache status`.
pub async fn handle_status(_args: StatusArgs) -> Result<()> {
    let cfg = config::load_config().context("Failed to load sprout configuration")?;
    let cache_dir = cfg.cache_dir();

    if !cache_dir.exists() {
        println!("Cache directory '{}' does not exist yet.", cache_dir.display());
        return Ok(());
    }

    let (archives, total_bytes) = measure_cache(&cache_dir)?;
    println!("Cache directory: {}", cache_dir.display());
    println!("Cached archives: {}", archives);
    println!("Total size:      {}", format_size(total_bytes));
    Ok(())
}

/// Counts cached archives and sums the size of every file under the cache.
fn measure_cache(cache_dir: &Path) -> Result<(usize, u64)> {
    let mut archives = 0usize;
    let mut total_bytes = 0u64;

    for entry in WalkDir::new(cache_dir) {
        let entry = entry
            .with_context(|| format!("Failed to walk cache directory {:?}", cache_dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        total_bytes += entry
            .metadata()
            .with_context(|| format!("Failed to read metadata of {:?}", entry.path()))?
            .len();
        if entry.file_name().to_string_lossy().ends_with(".tar.gz") {
            archives += 1;
        }
    }

    Ok((archives, total_bytes))
}

/// Human-readable byte count (binary units).
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
