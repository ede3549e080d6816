//! # Sprout Tarball Extraction
//!
//! File: cli/src/common/archive/tar.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Unpacks the gzipped tar archives the hosting services serve for a
//! repository snapshot. Those archives wrap everything in one synthetic
//! top-level directory (e.g. `widgets-<hash>/...`), which callers never
//! want; extraction strips that first path component so the repository
//! contents land directly in the destination directory.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};
use tar::EntryType;
use tracing::debug;

/// Extracts a `.tar.gz` archive into `dest`, stripping the first path
/// component of every entry.
///
/// Entries that *are* the top-level directory itself are skipped. The
/// archive comes from a remote host, so any entry that would place or
/// write content outside `dest` fails extraction: `..` components, link
/// entries whose target leaves `dest`, and paths that resolve outside it
/// through an earlier symlink.
pub fn extract_tar_gz(archive_path: &Path, dest: &Path) -> Result<()> {
    debug!("Extracting {:?} into {:?}", archive_path, dest);

    let file = fs::File::open(archive_path)
        .with_context(|| format!("Failed to open archive {:?}", archive_path))?;
    let decoder = flate2::read::GzDecoder::new(file);
    let mut archive = tar::Archive::new(decoder);

    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create destination directory {:?}", dest))?;
    let dest_real = dest
        .canonicalize()
        .with_context(|| format!("Failed to resolve destination directory {:?}", dest))?;

    let entries = archive
        .entries()
        .with_context(|| format!("Failed to read archive {:?}", archive_path))?;
    for entry in entries {
        let mut entry = entry
            .with_context(|| format!("Failed to read an entry of {:?}", archive_path))?;
        let entry_path = entry
            .path()
            .context("Archive entry has an invalid path")?
            .into_owned();

        // Drop the synthetic top-level directory component.
        let stripped: PathBuf = entry_path.components().skip(1).collect();
        if stripped.as_os_str().is_empty() {
            continue;
        }
        // Refuse entries that would unpack outside the destination.
        if stripped
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            anyhow::bail!(
                "Archive entry {:?} would escape the destination directory",
                entry_path
            );
        }

        let target = dest.join(&stripped);

        // A symlink or hard link may only point inside the destination;
        // anything else lets a later entry write through it to an
        // arbitrary path.
        let entry_type = entry.header().entry_type();
        if matches!(entry_type, EntryType::Symlink | EntryType::Link) {
            let link = entry
                .link_name()
                .context("Archive link entry has an invalid target")?
                .ok_or_else(|| {
                    anyhow::anyhow!("Archive link entry {:?} has no target", entry_path)
                })?;
            if link_escapes(dest, &target, &link) {
                anyhow::bail!(
                    "Archive entry {:?} links to {:?} outside the destination directory",
                    entry_path,
                    link
                );
            }
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
            // Resolve symlinks along the way; a parent that lands outside
            // the destination means an earlier entry planted a link there.
            let parent_real = parent
                .canonicalize()
                .with_context(|| format!("Failed to resolve directory {:?}", parent))?;
            if !parent_real.starts_with(&dest_real) {
                anyhow::bail!(
                    "Archive entry {:?} resolves outside the destination directory",
                    entry_path
                );
            }
        }
        entry
            .unpack(&target)
            .with_context(|| format!("Failed to unpack {:?} to {:?}", entry_path, target))?;
    }

    Ok(())
}

/// Reports whether a link created at `target` pointing to `link` could
/// reach outside `dest`. Resolution is lexical, relative to the link's
/// own directory; absolute targets always escape.
fn link_escapes(dest: &Path, target: &Path, link: &Path) -> bool {
    let mut resolved = match target.parent() {
        Some(parent) => parent.to_path_buf(),
        None => return true,
    };
    for component in link.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir => {
                if !resolved.pop() || !resolved.starts_with(dest) {
                    return true;
                }
            }
            Component::RootDir | Component::Prefix(_) => return true,
        }
    }
    !resolved.starts_with(dest)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Builds a gzipped tarball on disk whose entries live under a single
    /// synthetic top-level directory, the way hosting services serve them.
    fn build_archive(prefix: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let work_dir = tempdir()?;

        let content_dir = work_dir.path().join("content");
        fs::create_dir_all(content_dir.join("src"))?;
        fs::write(content_dir.join("README.md"), "# template")?;
        fs::write(content_dir.join("src/main.rs"), "fn main() {}")?;

        let archive_path = work_dir.path().join("snapshot.tar.gz");
        let file = fs::File::create(&archive_path)?;
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder.append_dir_all(prefix, &content_dir)?;
        builder
            .into_inner()
            .context("Failed to finalize tar archive structure")?
            .finish()
            .context("Failed to finish gzip compression stream")?;

        Ok((work_dir, archive_path))
    }

    #[test]
    fn test_extract_strips_top_level_directory() -> Result<()> {
        let (_work_dir, archive_path) = build_archive("widgets-abc123")?;
        let dest_dir = tempdir()?;

        extract_tar_gz(&archive_path, dest_dir.path())?;

        // Contents land directly in dest, without the widgets-abc123 wrapper.
        assert_eq!(
            fs::read_to_string(dest_dir.path().join("README.md"))?,
            "# template"
        );
        assert_eq!(
            fs::read_to_string(dest_dir.path().join("src/main.rs"))?,
            "fn main() {}"
        );
        assert!(!dest_dir.path().join("widgets-abc123").exists());
        Ok(())
    }

    #[test]
    fn test_extract_creates_missing_destination() -> Result<()> {
        let (_work_dir, archive_path) = build_archive("repo-HEAD")?;
        let base_dir = tempdir()?;
        let dest = base_dir.path().join("new/project");

        extract_tar_gz(&archive_path, &dest)?;

        assert!(dest.join("README.md").is_file());
        Ok(())
    }

    #[test]
    fn test_extract_missing_archive_fails() {
        let base_dir = tempdir().unwrap();
        let result = extract_tar_gz(&base_dir.path().join("nope.tar.gz"), base_dir.path());
        assert!(result.is_err());
    }

    /// Builds a gzipped tarball containing a symlink entry and a file
    /// placed beneath that symlink, the shape a hostile archive uses to
    /// write through the link.
    fn build_link_archive(dir: &Path, link_target: &str) -> Result<PathBuf> {
        let archive_path = dir.join("hostile.tar.gz");
        let file = fs::File::create(&archive_path)?;
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let mut link_header = tar::Header::new_gnu();
        link_header.set_entry_type(EntryType::Symlink);
        link_header.set_size(0);
        link_header.set_mode(0o777);
        builder.append_link(&mut link_header, "repo-x/link", link_target)?;

        let mut file_header = tar::Header::new_gnu();
        file_header.set_size(4);
        file_header.set_mode(0o644);
        builder.append_data(&mut file_header, "repo-x/link/evil.txt", &b"evil"[..])?;

        builder
            .into_inner()
            .context("Failed to finalize tar archive structure")?
            .finish()
            .context("Failed to finish gzip compression stream")?;
        Ok(archive_path)
    }

    #[test]
    fn test_extract_refuses_absolute_symlink_target() -> Result<()> {
        let work_dir = tempdir()?;
        let outside = work_dir.path().join("outside");
        fs::create_dir_all(&outside)?;
        let archive_path = build_link_archive(work_dir.path(), outside.to_str().unwrap())?;

        let dest = work_dir.path().join("dest");
        assert!(extract_tar_gz(&archive_path, &dest).is_err());
        // The file beneath the link never lands outside the destination.
        assert!(!outside.join("evil.txt").exists());
        Ok(())
    }

    #[test]
    fn test_extract_refuses_relative_symlink_escape() -> Result<()> {
        let work_dir = tempdir()?;
        let outside = work_dir.path().join("outside");
        fs::create_dir_all(&outside)?;
        let archive_path = build_link_archive(work_dir.path(), "../outside")?;

        let dest = work_dir.path().join("dest");
        assert!(extract_tar_gz(&archive_path, &dest).is_err());
        assert!(!outside.join("evil.txt").exists());
        assert!(!dest.join("evil.txt").exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_allows_symlink_inside_destination() -> Result<()> {
        let work_dir = tempdir()?;
        let archive_path = work_dir.path().join("snapshot.tar.gz");
        let file = fs::File::create(&archive_path)?;
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let mut file_header = tar::Header::new_gnu();
        file_header.set_size(12);
        file_header.set_mode(0o644);
        builder.append_data(&mut file_header, "repo-x/src/main.rs", &b"fn main() {}"[..])?;

        let mut link_header = tar::Header::new_gnu();
        link_header.set_entry_type(EntryType::Symlink);
        link_header.set_size(0);
        link_header.set_mode(0o777);
        builder.append_link(&mut link_header, "repo-x/docs-link", "src")?;

        builder
            .into_inner()
            .context("Failed to finalize tar archive structure")?
            .finish()
            .context("Failed to finish gzip compression stream")?;

        let dest = work_dir.path().join("dest");
        extract_tar_gz(&archive_path, &dest)?;

        assert!(dest.join("src/main.rs").is_file());
        assert!(fs::symlink_metadata(dest.join("docs-link"))?
            .file_type()
            .is_symlink());
        Ok(())
    }
}
