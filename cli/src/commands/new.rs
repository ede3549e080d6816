//! # Sprout New Command
//!
//! File: cli/src/commands/new.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Implements `sprout new <source> [dest]`: materialize a copy of a remote
//! repository template into a local directory, without its version-control
//! history.
//!
//! ## Flow
//!
//! 1. Parse the template source and load configuration (the `--proxy` flag,
//!    or `HTTPS_PROXY`, overrides the configured proxy).
//! 2. Resolve and validate the destination. A non-empty destination is only
//!    allowed with `--force`, in which case its contents are stashed into
//!    the cache-local staging area before scaffolding and reconciled back
//!    afterwards.
//! 3. Resolve the requested ref to a commit hash (`git ls-remote`, unless
//!    the ref already is a full hash).
//! 4. Download the snapshot tarball into the per-repository cache directory,
//!    reusing an archive that is already there.
//! 5. Extract it into the destination, stripping the archive's synthetic
//!    top-level directory.
//! 6. Unstash any displaced pre-existing files.
//!
//! There is no rollback: a failure after stashing leaves the destination
//! and staging area as they are, for manual recovery.
//!
use crate::common::{
    archive,
    fs::stage,
    net::fetch,
    process,
    ui::progress,
};
use crate::core::{
    config,
    error::{Result, SproutError},
    source::{self, TemplateSource},
};
use anyhow::Context;
use clap::Parser;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Arguments accepted by `sprout new`.
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Template source: user/repo, github:user/repo, gitlab:user/repo,
    /// bitbucket:user/repo, or a full URL. Append #ref for a branch, tag,
    /// or commit hash.
    source: String,

    /// Target directory. Defaults to ./<repo-name>.
    dest: Option<PathBuf>,

    /// Scaffold into a non-empty directory, displacing its contents and
    /// restoring them after extraction.
    #[arg(long, short = 'f')]
    force: bool,

    /// Proxy URL for the tarball download.
    #[arg(long, env = "HTTPS_PROXY")]
    proxy: Option<String>,
}

/// Handler for `sprout new`.
pub async fn handle_new(args: NewArgs) -> Result<()> {
    let template = TemplateSource::parse(&args.source)?;
    info!(
        "Scaffolding from {}/{}/{}#{}",
        template.host.short_name(),
        template.user,
        template.repo,
        template.reference
    );

    let cfg = config::load_config().context("Failed to load sprout configuration")?;
    let proxy = args.proxy.clone().or(cfg.network.proxy.clone());

    let dest = resolve_dest(args.dest.as_deref(), &template)?;
    let needs_stash = validate_dest(&dest, args.force)?;

    // Per-repository cache directory; also hosts the staging area for a
    // stash/unstash cycle.
    let repo_cache_dir = cfg.cache_dir().join(template.cache_subdir());
    fs::create_dir_all(&repo_cache_dir)
        .with_context(|| format!("Failed to create cache directory {:?}", repo_cache_dir))?;

    if needs_stash {
        stage::stash_files(&repo_cache_dir, &dest)
            .await
            .context("Failed to stash existing destination contents")?;
    } else {
        fs::create_dir_all(&dest)
            .with_context(|| format!("Failed to create destination directory {:?}", dest))?;
    }

    scaffold(&template, &dest, &repo_cache_dir, proxy.as_deref()).await?;

    if needs_stash {
        stage::unstash_files(&repo_cache_dir, &dest)
            .await
            .context("Failed to restore displaced destination contents")?;
    }

    print_completion_message(&dest, &template);
    Ok(())
}

/// Downloads (or reuses) the snapshot tarball and extracts it into `dest`.
async fn scaffold(
    template: &TemplateSource,
    dest: &Path,
    repo_cache_dir: &Path,
    proxy: Option<&str>,
) -> Result<()> {
    let hash = resolve_ref(template).await?;
    debug!("Resolved ref '{}' to {}", template.reference, hash);

    let archive_path = repo_cache_dir.join(format!("{hash}.tar.gz"));
    if archive_path.exists() {
        info!("Using cached archive {:?}", archive_path);
    } else {
        let url = template.tarball_url(&hash);
        let pb = progress::spinner(&format!("Downloading {url}"));
        match fetch::fetch(&url, &archive_path, proxy).await {
            Ok(()) => progress::finish_success(&pb, &format!("Downloaded {url}")),
            Err(e) => {
                progress::finish_failure(&pb, &format!("Failed to download {url}"));
                return Err(e);
            }
        }
    }

    archive::tar::extract_tar_gz(&archive_path, dest)
        .with_context(|| format!("Failed to extract template into {:?}", dest))
}

/// Resolves the template's ref to a commit hash.
///
/// A full 40-character hash is used as-is; anything else is looked up in
/// the output of `git ls-remote`.
async fn resolve_ref(template: &TemplateSource) -> Result<String> {
    if source::is_full_hash(&template.reference) {
        return Ok(template.reference.clone());
    }

    let url = template.remote_url();
    let output = process::run_command_capture("git", &["ls-remote", &url])
        .await
        .with_context(|| format!("Failed to list refs of '{}'", url))?;

    select_ref(&output.stdout, &template.reference).ok_or_else(|| {
        SproutError::RefNotFound {
            reference: template.reference.clone(),
            url,
        }
        .into()
    })
}

/// Picks the hash matching `reference` from `git ls-remote` output.
///
/// Matching order: `HEAD`, branch or tag name, then hash prefix (for
/// abbreviated commit hashes of at least 7 hex digits).
fn select_ref(ls_remote: &str, reference: &str) -> Option<String> {
    let refs: Vec<(&str, &str)> = ls_remote
        .lines()
        .filter_map(|line| line.split_once('\t'))
        .collect();

    for (hash, name) in &refs {
        let short = name
            .strip_prefix("refs/heads/")
            .or_else(|| name.strip_prefix("refs/tags/"))
            .unwrap_or(name);
        if short == reference {
            return Some(hash.to_string());
        }
    }

    // Abbreviated commit hash.
    if reference.len() >= 7 && reference.chars().all(|c| c.is_ascii_hexdigit()) {
        for (hash, _) in &refs {
            if hash.starts_with(reference) {
                return Some(hash.to_string());
            }
        }
    }

    None
}

/// Resolves the destination directory, defaulting to `./<repo-name>`.
fn resolve_dest(dest: Option<&Path>, template: &TemplateSource) -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    Ok(match dest {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => current_dir.join(path),
        None => current_dir.join(&template.repo),
    })
}

/// Validates the destination, returning whether its existing contents need
/// to be stashed around the scaffolding action.
fn validate_dest(dest: &Path, force: bool) -> Result<bool> {
    if !dest.exists() {
        return Ok(false);
    }
    if !dest.is_dir() {
        anyhow::bail!(
            "Destination '{}' exists but is not a directory.",
            dest.display()
        );
    }
    let is_empty = fs::read_dir(dest)
        .with_context(|| format!("Failed to read destination directory {:?}", dest))?
        .next()
        .is_none();
    if is_empty {
        return Ok(false);
    }
    if !force {
        anyhow::bail!(
            "Destination '{}' is not empty. Use --force to scaffold into it anyway.",
            dest.display()
        );
    }
    Ok(true)
}

fn print_completion_message(dest: &Path, template: &TemplateSource) {
    println!(
        "Project scaffolded from {}/{} into '{}'.",
        template.user,
        template.repo,
        dest.display()
    );
    println!("Next steps:");
    println!("  cd {}", dest.display());
    println!("  git init && git add -A && git commit -m \"Initial commit\"");
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const LS_REMOTE: &str = "\
aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\tHEAD\n\
aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\trefs/heads/main\n\
bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb\trefs/heads/develop\n\
cccccccccccccccccccccccccccccccccccccccc\trefs/tags/v1.0.0\n";

    #[test]
    fn test_select_ref_head() {
        assert_eq!(
            select_ref(LS_REMOTE, "HEAD").as_deref(),
            Some("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")
        );
    }

    #[test]
    fn test_select_ref_branch_and_tag() {
        assert_eq!(
            select_ref(LS_REMOTE, "develop").as_deref(),
            Some("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb")
        );
        assert_eq!(
            select_ref(LS_REMOTE, "v1.0.0").as_deref(),
            Some("cccccccccccccccccccccccccccccccccccccccc")
        );
    }

    #[test]
    fn test_select_ref_hash_prefix() {
        assert_eq!(
            select_ref(LS_REMOTE, "ccccccc").as_deref(),
            Some("cccccccccccccccccccccccccccccccccccccccc")
        );
        // Too short for a prefix match.
        assert_eq!(select_ref(LS_REMOTE, "cccc"), None);
    }

    #[test]
    fn test_select_ref_unknown() {
        assert_eq!(select_ref(LS_REMOTE, "no-such-branch"), None);
    }

    #[test]
    fn test_validate_dest_missing_or_empty() -> Result<()> {
        let base_dir = tempdir()?;
        // Missing: nothing to stash.
        assert!(!validate_dest(&base_dir.path().join("missing"), false)?);
        // Existing but empty: nothing to stash either.
        assert!(!validate_dest(base_dir.path(), false)?);
        Ok(())
    }

    #[test]
    fn test_validate_dest_non_empty() -> Result<()> {
        let dest_dir = tempdir()?;
        fs::write(dest_dir.path().join("precious.txt"), "do not lose")?;

        // Without --force this is refused.
        assert!(validate_dest(dest_dir.path(), false).is_err());
        // With --force the contents must be stashed.
        assert!(validate_dest(dest_dir.path(), true)?);
        Ok(())
    }

    #[test]
    fn test_validate_dest_rejects_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file");
        fs::write(&file_path, "not a directory")?;
        assert!(validate_dest(&file_path, true).is_err());
        Ok(())
    }

    #[test]
    fn test_resolve_dest_defaults_to_repo_name() -> Result<()> {
        let template = TemplateSource::parse("acme/widgets")?;
        let dest = resolve_dest(None, &template)?;
        assert!(dest.ends_with("widgets"));
        assert!(dest.is_absolute());
        Ok(())
    }
}
