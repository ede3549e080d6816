//! # Sprout Template Source Parsing
//!
//! File: cli/src/core/source.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Turns the user-supplied template specifier into a structured
//! `TemplateSource`: hosting service, owner, repository name, and the git
//! reference to materialize. Accepted spellings:
//!
//! - `user/repo` (GitHub assumed)
//! - `github:user/repo`, `gitlab:user/repo`, `bitbucket:user/repo`
//! - `github.com/user/repo` (bare domain)
//! - `https://github.com/user/repo` (full URL)
//! - `git@github.com:user/repo` (SSH-style remotes)
//!
//! Any form may carry a `#ref` suffix naming a branch, tag, or commit hash;
//! the default reference is `HEAD`. A trailing `.git` on the repository name
//! is ignored.
//!
//! The parsed source also knows how to build the URLs the rest of the tool
//! needs: the canonical https remote (for `git ls-remote`) and the per-host
//! tarball download URL for a resolved commit hash.
//!
use crate::core::error::{Result, SproutError};
use std::path::PathBuf;
use url::Url;

/// Repository hosting services sprout can download tarballs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    GitHub,
    GitLab,
    Bitbucket,
}

impl Host {
    /// Short name, used for `host:user/repo` specifiers and cache paths.
    pub fn short_name(&self) -> &'static str {
        match self {
            Host::GitHub => "github",
            Host::GitLab => "gitlab",
            Host::Bitbucket => "bitbucket",
        }
    }

    /// The service's web domain.
    pub fn domain(&self) -> &'static str {
        match self {
            Host::GitHub => "github.com",
            Host::GitLab => "gitlab.com",
            Host::Bitbucket => "bitbucket.org",
        }
    }

    fn from_short_name(name: &str) -> Option<Host> {
        match name {
            "github" => Some(Host::GitHub),
            "gitlab" => Some(Host::GitLab),
            "bitbucket" => Some(Host::Bitbucket),
            _ => None,
        }
    }

    fn from_domain(domain: &str) -> Option<Host> {
        match domain {
            "github.com" | "www.github.com" => Some(Host::GitHub),
            "gitlab.com" | "www.gitlab.com" => Some(Host::GitLab),
            "bitbucket.org" | "www.bitbucket.org" => Some(Host::Bitbucket),
            _ => None,
        }
    }
}

/// A parsed template specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub host: Host,
    pub user: String,
    pub repo: String,
    /// Branch, tag, or commit hash. Defaults to `HEAD`.
    pub reference: String,
}

impl TemplateSource {
    /// Parses a template specifier string.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || SproutError::InvalidSource(input.to_string());

        // Split off the optional `#ref` suffix first; it applies uniformly
        // to every spelling of the remainder.
        let (spec, reference) = match input.split_once('#') {
            Some((spec, reference)) => {
                if reference.is_empty() {
                    return Err(invalid().into());
                }
                (spec, reference.to_string())
            }
            None => (input, "HEAD".to_string()),
        };

        let (host, rest) = if spec.contains("://") {
            // Full URL form.
            let url = Url::parse(spec).map_err(|_| invalid())?;
            let host = url
                .host_str()
                .and_then(Host::from_domain)
                .ok_or_else(invalid)?;
            (host, url.path().trim_matches('/').to_string())
        } else if let Some((head, rest)) = spec.split_once(':') {
            // `github:user/repo` or `git@github.com:user/repo`.
            let name = head.strip_prefix("git@").unwrap_or(head);
            let host = Host::from_short_name(name)
                .or_else(|| Host::from_domain(name))
                .ok_or_else(invalid)?;
            (host, rest.to_string())
        } else {
            // `user/repo` or `github.com/user/repo`.
            match spec.split('/').collect::<Vec<_>>().as_slice() {
                [domain, rest @ ..] if domain.contains('.') => {
                    let host = Host::from_domain(domain).ok_or_else(invalid)?;
                    (host, rest.join("/"))
                }
                _ => (Host::GitHub, spec.to_string()),
            }
        };

        // The remainder must be exactly `user/repo`, both segments non-empty.
        let (user, repo) = match rest.split('/').collect::<Vec<_>>().as_slice() {
            [user, repo] if !user.is_empty() && !repo.is_empty() => {
                (user.to_string(), repo.trim_end_matches(".git").to_string())
            }
            _ => return Err(invalid().into()),
        };
        if repo.is_empty() {
            return Err(invalid().into());
        }

        Ok(TemplateSource {
            host,
            user,
            repo,
            reference,
        })
    }

    /// The canonical https remote URL, suitable for `git ls-remote`.
    pub fn remote_url(&self) -> String {
        format!("https://{}/{}/{}", self.host.domain(), self.user, self.repo)
    }

    /// The tarball download URL for a resolved commit hash.
    pub fn tarball_url(&self, hash: &str) -> String {
        let url = self.remote_url();
        match self.host {
            Host::GitHub => format!("{url}/archive/{hash}.tar.gz"),
            Host::GitLab => format!("{url}/repository/archive.tar.gz?ref={hash}"),
            Host::Bitbucket => format!("{url}/get/{hash}.tar.gz"),
        }
    }

    /// Cache location for this repository, relative to the cache root.
    pub fn cache_subdir(&self) -> PathBuf {
        PathBuf::from(self.host.short_name())
            .join(&self.user)
            .join(&self.repo)
    }
}

/// Whether a reference is a full 40-character commit hash, which can be used
/// for a tarball URL without consulting the remote.
pub fn is_full_hash(reference: &str) -> bool {
    reference.len() == 40 && reference.chars().all(|c| c.is_ascii_hexdigit())
}
