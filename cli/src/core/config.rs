//! # Sprout Configuration Loading
//!
//! File: cli/src/core/config.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Loads the optional user configuration file and resolves the settings the
//! rest of the application consumes: the download cache root and an optional
//! HTTP(S) proxy URL. Configuration is intentionally small; command-line
//! flags always win over the file.
//!
//! ## Architecture
//!
//! - `Config` / `CacheConfig` / `NetworkConfig`: `serde`-deserialized TOML
//!   structures with per-field defaults.
//! - `load_config`: reads `config.toml` from the platform config directory
//!   (via `directories::ProjectDirs`), falls back to defaults when absent,
//!   then applies the `SPROUT_CACHE_DIR` environment override (used by
//!   integration tests to avoid touching the real cache).
//! - `Config::cache_dir`: expands the configured cache path to an absolute
//!   `PathBuf`. Tilde paths resolve against the home directory, or the
//!   system temp directory when no home is available, so the resolved base
//!   path is always computed here and passed explicitly into the components
//!   that use it.
//!
//! ## Example configuration
//!
//! ```toml
//! [cache]
//! directory = "~/.sprout"
//!
//! [network]
//! proxy = "http://proxy.internal:3128"
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from a TOML file.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Settings for the per-user download cache.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Root directory for cached template archives (can use ~). Expanded
    /// by `Config::cache_dir`.
    #[serde(default = "default_cache_dir")]
    pub directory: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: default_cache_dir(),
        }
    }
}

/// Network-related settings.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    /// Proxy URL used for template downloads when set. The `--proxy` flag
    /// (or `HTTPS_PROXY`) overrides this.
    #[serde(default)]
    pub proxy: Option<String>,
}

fn default_cache_dir() -> String {
    "~/.sprout".to_string()
}

/// Environment variable that overrides the configured cache directory.
pub const CACHE_DIR_ENV: &str = "SPROUT_CACHE_DIR";

impl Config {
    /// Resolves the configured cache directory to an absolute path.
    ///
    /// A leading `~` resolves against the user's home directory; when no
    /// home directory can be determined (e.g. stripped-down CI
    /// environments), the system temp directory is used instead so the tool
    /// still has a writable cache root.
    pub fn cache_dir(&self) -> PathBuf {
        let raw = self.cache.directory.as_str();
        if raw == "~" || raw.starts_with("~/") {
            let base = dirs::home_dir().unwrap_or_else(|| {
                warn!("No home directory found, caching under the temp directory");
                env::temp_dir()
            });
            base.join(raw.trim_start_matches('~').trim_start_matches('/'))
        } else {
            // Covers `~user` forms and plain absolute/relative paths.
            PathBuf::from(shellexpand::tilde(raw).into_owned())
        }
    }
}

/// Loads the effective configuration.
///
/// Order of precedence, weakest first: built-in defaults, the user
/// `config.toml`, the `SPROUT_CACHE_DIR` environment variable.
pub fn load_config() -> Result<Config> {
    let mut config = load_user_config()?.unwrap_or_default();

    if let Ok(dir) = env::var(CACHE_DIR_ENV) {
        if !dir.is_empty() {
            debug!("Cache directory overridden by {}: {}", CACHE_DIR_ENV, dir);
            config.cache.directory = dir;
        }
    }

    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "sprout", "sprout") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.cache.directory, "~/.sprout");
        assert!(config.network.proxy.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [cache]
            directory = "/var/cache/sprout"

            [network]
            proxy = "http://proxy.internal:3128"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.cache.directory, "/var/cache/sprout");
        assert_eq!(
            config.network.proxy.as_deref(),
            Some("http://proxy.internal:3128")
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let toml_str = r#"
            [network]
            proxy = "http://localhost:8888"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.cache.directory, "~/.sprout");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let toml_str = r#"
            [cache]
            directorty = "/oops/typo"
        "#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_cache_dir_expands_tilde() {
        let config = Config::default();
        let dir = config.cache_dir();
        // Whatever base was chosen (home or temp), the tilde must be gone
        // and the reserved suffix preserved.
        assert!(!dir.to_string_lossy().contains('~'));
        assert!(dir.ends_with(".sprout"));
    }

    #[test]
    fn test_cache_dir_absolute_passthrough() {
        let config = Config {
            cache: CacheConfig {
                directory: "/var/cache/sprout".into(),
            },
            network: NetworkConfig::default(),
        };
        assert_eq!(config.cache_dir(), PathBuf::from("/var/cache/sprout"));
    }
}
