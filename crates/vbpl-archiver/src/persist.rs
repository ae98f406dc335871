//! Write-once persistence of rendered pages and downloaded documents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use vbpl_core::{ArtifactStore, Category, ItemId, Slot};

use crate::http_client::{DownloadOutcome, HttpClient};
use crate::renderer::PageRenderer;

/// What a save call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Artifact fetched and written.
    Saved(PathBuf),
    /// Artifact was already on disk; nothing fetched.
    AlreadyExists(PathBuf),
    /// Download answered with a non-success status; nothing written.
    DownloadFailed { status: u16 },
}

/// Saves artifacts into the store, fetching only what is missing.
pub struct Persister<'a, R: PageRenderer + ?Sized> {
    store: &'a ArtifactStore,
    renderer: &'a R,
    http: &'a HttpClient,
}

impl<'a, R: PageRenderer + ?Sized> Persister<'a, R> {
    pub fn new(store: &'a ArtifactStore, renderer: &'a R, http: &'a HttpClient) -> Self {
        Self {
            store,
            renderer,
            http,
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        self.store
    }

    pub fn renderer(&self) -> &R {
        self.renderer
    }

    /// Render `url` and save the markup, unless the artifact already exists.
    pub async fn save_text(&self, url: &str, category: Category, id: &ItemId) -> Result<SaveOutcome> {
        let path = match self.store.prepare(category, id)? {
            Slot::Existing(path) => {
                tracing::info!("File already exists: {}", path.display());
                return Ok(SaveOutcome::AlreadyExists(path));
            }
            Slot::Vacant(path) => path,
        };

        let html = self.renderer.render(url).await?;
        self.store
            .write_text(&path, &html)
            .with_context(|| format!("failed to write {}", path.display()))?;

        tracing::info!("Saved: {}", path.display());
        Ok(SaveOutcome::Saved(path))
    }

    /// Download `url` as raw bytes, unless the artifact already exists.
    pub async fn save_binary(
        &self,
        url: &str,
        category: Category,
        id: &ItemId,
    ) -> Result<SaveOutcome> {
        let path = match self.store.prepare(category, id)? {
            Slot::Existing(path) => {
                tracing::info!("File already exists: {}", path.display());
                return Ok(SaveOutcome::AlreadyExists(path));
            }
            Slot::Vacant(path) => path,
        };

        match self.http.download_to(url, &path).await? {
            DownloadOutcome::Saved { bytes } => {
                tracing::info!("PDF Saved: {} ({bytes} bytes)", path.display());
                Ok(SaveOutcome::Saved(path))
            }
            DownloadOutcome::HttpStatus(status) => {
                tracing::warn!("Failed to download PDF: {url} (HTTP {status})");
                Ok(SaveOutcome::DownloadFailed { status })
            }
        }
    }
}
