//! # Sprout Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Archive handling for downloaded template snapshots. The hosting services
//! all serve gzipped tarballs, so that is the only format handled here.

/// Gzipped tarball extraction with top-level directory stripping.
pub mod tar;
