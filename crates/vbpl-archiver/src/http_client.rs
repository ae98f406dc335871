//! Async HTTP client wrapping reqwest, used for binary downloads.
//!
//! Not a browser — plain GET requests. Bodies are streamed to a `.part`
//! file and renamed into place only once complete.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use vbpl_core::part_path;

/// Size of the blocks written to disk while streaming a body.
pub const DOWNLOAD_CHUNK_SIZE: usize = 1024;

/// Outcome of a download attempt that reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Body written to the target path.
    Saved { bytes: u64 },
    /// Server answered with a non-success status; nothing written.
    HttpStatus(u16),
}

/// HTTP client for document downloads.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client with a desktop Chrome user-agent.
    pub fn new(timeout: Duration) -> Self {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                  AppleWebKit/537.36 (KHTML, like Gecko) \
                  Chrome/131.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(ua)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// GET `url` and stream the body to `path`.
    ///
    /// On a non-success status no file is created. If the transfer fails
    /// midway the partial file is removed before the error is returned.
    pub async fn download_to(&self, url: &str, path: &Path) -> Result<DownloadOutcome> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            return Ok(DownloadOutcome::HttpStatus(status.as_u16()));
        }

        let part = part_path(path);
        match stream_body(resp, &part).await {
            Ok(bytes) => {
                tokio::fs::rename(&part, path)
                    .await
                    .with_context(|| format!("failed to move {} into place", part.display()))?;
                Ok(DownloadOutcome::Saved { bytes })
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&part).await;
                Err(e.context(format!("download of {url} interrupted")))
            }
        }
    }
}

async fn stream_body(mut resp: reqwest::Response, part: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(part)
        .await
        .with_context(|| format!("failed to create {}", part.display()))?;
    let mut written = 0u64;

    while let Some(chunk) = resp.chunk().await? {
        for block in chunk.chunks(DOWNLOAD_CHUNK_SIZE) {
            file.write_all(block).await?;
        }
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}
