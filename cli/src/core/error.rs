//! # Sprout Error Types
//!
//! File: cli/src/core/error.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Defines the error types used throughout the application. Failures that
//! callers may want to distinguish (a remote server rejecting a download, a
//! redirect chain that never terminates, an external command exiting
//! non-zero) get their own `SproutError` variant carrying the relevant
//! fields; everything else travels as a plain `anyhow::Error` with context
//! attached at the failure site.
//!
//! ## Architecture
//!
//! Two pieces:
//! - `SproutError`: a custom error enum derived with `thiserror`.
//! - `Result<T>`: a type alias for `anyhow::Result<T>`.
//!
//! The enum is deliberately closed: each variant names its fields instead of
//! carrying an open property bag. Contextual detail that doesn't fit a
//! variant is layered on with `anyhow::Context`, which keeps the original
//! error (and its fields) reachable via `downcast_ref`.
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type.
//! if code >= 400 {
//!     anyhow::bail!(SproutError::RemoteRejection { code, message });
//! }
//!
//! // Add context to errors using anyhow.
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//!
//! // Recover structured fields after propagation.
//! if let Some(SproutError::RemoteRejection { code, .. }) = err.downcast_ref::<SproutError>() {
//!     eprintln!("server said {code}");
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the sprout application.
#[derive(Error, Debug)]
pub enum SproutError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("HTTP transport error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Remote server responded with {code}: {message}")]
    RemoteRejection { code: u16, message: String },

    #[error("Redirect limit of {limit} exceeded while fetching '{url}'")]
    TooManyRedirects { limit: usize, url: String },

    #[error("Could not parse template source '{0}'")]
    InvalidSource(String),

    #[error("Could not find ref '{reference}' in '{url}'")]
    RefNotFound { reference: String, url: String },

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = SproutError::Config("Missing setting 'cache.directory'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'cache.directory'"
        );

        let rejection = SproutError::RemoteRejection {
            code: 404,
            message: "Not Found".into(),
        };
        assert_eq!(
            rejection.to_string(),
            "Remote server responded with 404: Not Found"
        );

        let redirects = SproutError::TooManyRedirects {
            limit: 10,
            url: "https://example.com/a".into(),
        };
        assert_eq!(
            redirects.to_string(),
            "Redirect limit of 10 exceeded while fetching 'https://example.com/a'"
        );
    }

    #[test]
    fn test_structured_fields_survive_anyhow() {
        use anyhow::Context;

        let err: anyhow::Error = Err::<(), _>(SproutError::RemoteRejection {
            code: 403,
            message: "Forbidden".into(),
        })
        .context("Failed to download template archive")
        .unwrap_err();

        match err.downcast_ref::<SproutError>() {
            Some(SproutError::RemoteRejection { code, .. }) => assert_eq!(*code, 403),
            other => panic!("expected RemoteRejection, got {:?}", other),
        }
    }
}
