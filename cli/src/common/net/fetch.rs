//! # Sprout Resource Fetcher
//!
//! File: cli/src/common/net/fetch.rs
//! Repository: https://github.com/sprout-cli/sprout
//!
//! ## Overview
//!
//! Downloads a URL to a local file, following HTTP redirects manually and
//! optionally routing the connection through a proxy. Automatic redirect
//! following is disabled on the client so the hop count can be bounded: a
//! chain longer than [`MAX_REDIRECTS`] fails with a distinct error instead
//! of looping forever on a misbehaving server.
//!
//! ## Behavior
//!
//! For each response:
//! - status >= 400: fail with `SproutError::RemoteRejection` carrying the
//!   numeric code and a status message. reqwest does not expose the reason
//!   phrase the server actually sent, so the message is the canonical
//!   phrase for the code. The destination file is not touched.
//! - 300 <= status < 400: resolve the `Location` header against the current
//!   URL and try again with the same destination and proxy.
//! - otherwise: stream the body to the destination file chunk by chunk;
//!   success is reported only after the last chunk has been written and
//!   flushed.
//!
//! When a proxy URL is supplied the client connects through it while the
//! request still targets the original host and path, so the remote server
//! observes the same request it would without a proxy.
//!
//! No retry, timeout, or integrity verification happens here; a stalled
//! peer stalls the fetch.
//!
use crate::core::error::{Result, SproutError};
use anyhow::Context;
use reqwest::{header, redirect::Policy, Client, Proxy};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

/// Upper bound on chained redirects before the fetch is abandoned.
pub const MAX_REDIRECTS: usize = 10;

/// Downloads `url` to `dest`, overwriting any existing file there.
pub async fn fetch(url: &str, dest: &Path, proxy: Option<&str>) -> Result<()> {
    let mut builder = Client::builder().redirect(Policy::none());
    if let Some(proxy_url) = proxy {
        debug!("Routing download through proxy {}", proxy_url);
        builder = builder.proxy(
            Proxy::all(proxy_url)
                .with_context(|| format!("Invalid proxy URL '{}'", proxy_url))?,
        );
    }
    let client = builder.build().context("Failed to build HTTP client")?;

    let mut current = Url::parse(url).with_context(|| format!("Invalid URL '{}'", url))?;
    for hop in 0..=MAX_REDIRECTS {
        debug!("GET {} (hop {})", current, hop);
        let response = client
            .get(current.clone())
            .send()
            .await
            .map_err(|source| SproutError::Http { source })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            // Terminal rejection; redirects are not an option here.
            return Err(SproutError::RemoteRejection {
                code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            }
            .into());
        } else if status.is_redirection() {
            let location = response
                .headers()
                .get(header::LOCATION)
                .ok_or_else(|| {
                    anyhow::anyhow!("Redirect from '{}' carried no Location header", current)
                })?
                .to_str()
                .context("Location header is not valid UTF-8")?;
            // Resolve relative Location values against the current URL.
            current = current
                .join(location)
                .with_context(|| format!("Invalid redirect target '{}'", location))?;
            continue;
        }

        // Success: create the file only now, then stream the body into it.
        let mut file = tokio::fs::File::create(dest)
            .await
            .with_context(|| format!("Failed to create {:?}", dest))?;
        let mut response = response;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|source| SproutError::Http { source })?
        {
            file.write_all(&chunk)
                .await
                .with_context(|| format!("Failed to write to {:?}", dest))?;
        }
        file.flush()
            .await
            .with_context(|| format!("Failed to flush {:?}", dest))?;
        info!("Downloaded {} to {:?}", url, dest);
        return Ok(());
    }

    Err(SproutError::TooManyRedirects {
        limit: MAX_REDIRECTS,
        url: url.to_string(),
    }
    .into())
}
