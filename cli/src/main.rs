//! # Sprout Main Entry Point
//!
//! File: cli/src/main.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Entry point for the sprout CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! Each top-level command (`new`, `cache`) is a variant in the `Commands`
//! enum, mapped to an async handler in its module under `commands`. All
//! errors propagate back here for consistent display and a non-zero exit
//! code.
//!
//! ## Examples
//!
//! ```bash
//! # Scaffold a project from a GitHub template
//! sprout new sveltejs/template my-app
//!
//! # A specific tag, through a proxy, into a non-empty directory
//! sprout new acme/widgets#v1.2.0 ./widgets --force --proxy http://proxy:3128
//!
//! # Inspect and clear the download cache
//! sprout cache status
//! sprout cache clear
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

// Declare the top-level modules of the CLI crate.
mod commands; // Command handlers (new, cache).
mod common; // Shared utilities (fs, net, archive, process, ui).
mod core; // Core infrastructure (errors, config, source parsing).

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "sprout",
    about = "🌱 sprout: scaffold projects from remote repository templates",
    long_about = "Materialize a copy of a remote repository into a local directory,\n\
                  without retaining its version-control history.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "n")]
    New(commands::new::NewArgs),
    #[command(alias = "c")]
    Cache(commands::cache::CacheArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::New(args) => commands::new::handle_new(args).await,
        Commands::Cache(args) => commands::cache::handle_cache(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

// --- Basic Integration Tests ---
#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    fn sprout_cmd() -> Command {
        Command::cargo_bin("sprout").expect("Failed to find sprout binary for testing")
    }
    #[test]
    fn test_main_help_flag() {
        sprout_cmd().arg("--help").assert().success();
    }
    #[test]
    fn test_main_version_flag() {
        sprout_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
