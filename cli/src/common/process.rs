//! # Sprout External Process Execution
//!
//! File: cli/src/common/process.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Runs an external command and captures its standard output and error
//! streams. The only current consumer is ref resolution, which shells out
//! to `git ls-remote`; the wrapper stays generic so other callers can reuse
//! it.
//!
//! A non-zero exit status is surfaced as `SproutError::ExternalCommand`
//! with the rendered command line, the exit status, and the captured
//! stderr, so the user sees what git itself complained about.
//!
use crate::core::error::{Result, SproutError};
use anyhow::Context;
use tracing::debug;

/// Captured output of a completed command.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs `program` with `args`, capturing stdout and stderr.
///
/// Fails if the program cannot be spawned or exits with a non-zero status.
pub async fn run_command_capture(program: &str, args: &[&str]) -> Result<CommandOutput> {
    let rendered = if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    };
    debug!("Running external command: {}", rendered);

    let output = tokio::process::Command::new(program)
        .args(args)
        .output()
        .await
        .with_context(|| format!("Failed to execute '{}'", rendered))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        anyhow::bail!(SproutError::ExternalCommand {
            cmd: rendered,
            status: output.status.to_string(),
            output: stderr,
        });
    }

    Ok(CommandOutput { stdout, stderr })
}
