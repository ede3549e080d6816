//! # Sprout Network Utilities Module (`common::net`)
//!
//! File: cli/src/common/net/mod.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Network-facing building blocks. Currently a single concern: downloading
//! a remote archive to a local file with bounded redirect chasing and
//! optional proxy routing.

/// HTTP download with manual, bounded redirect following.
pub mod fetch;
