//! Per-document fetch orchestration.
//!
//! For every identifier the five artifacts are fetched in a fixed order,
//! one at a time. Each sub-fetch is isolated: a failure is logged and
//! recorded, and the next sub-fetch still runs.

use anyhow::{anyhow, Result};
use serde::Serialize;
use vbpl_core::{extract_embedded_url, resolve_against, Category, ItemId, LocatorMiss, Slot};

use crate::endpoints::Endpoints;
use crate::persist::{Persister, SaveOutcome};
use crate::renderer::PageRenderer;

/// Result of one sub-fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Artifact written during this run.
    Saved,
    /// Artifact already on disk.
    AlreadyExists,
    /// The viewer page did not lead to a document URL.
    NotFound(LocatorMiss),
    /// The document host answered with a non-success status.
    DownloadFailed { status: u16 },
    /// The sub-fetch raised an error.
    Failed(String),
}

impl From<SaveOutcome> for FetchStatus {
    fn from(outcome: SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::Saved(_) => Self::Saved,
            SaveOutcome::AlreadyExists(_) => Self::AlreadyExists,
            SaveOutcome::DownloadFailed { status } => Self::DownloadFailed { status },
        }
    }
}

/// Outcome of all sub-fetches for one identifier, in fetch order.
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub id: ItemId,
    pub fetches: Vec<(Category, FetchStatus)>,
}

impl ItemReport {
    pub fn status(&self, category: Category) -> Option<&FetchStatus> {
        self.fetches
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, s)| s)
    }
}

/// Aggregate counters for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub items: usize,
    pub saved: usize,
    pub already_existed: usize,
    pub missed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, report: &ItemReport) {
        self.items += 1;
        for (_, status) in &report.fetches {
            match status {
                FetchStatus::Saved => self.saved += 1,
                FetchStatus::AlreadyExists => self.already_existed += 1,
                FetchStatus::NotFound(_) | FetchStatus::DownloadFailed { .. } => self.missed += 1,
                FetchStatus::Failed(_) => self.failed += 1,
            }
        }
    }
}

/// Drives the five sub-fetches for each identifier.
pub struct Orchestrator<'a, R: PageRenderer + ?Sized> {
    persister: Persister<'a, R>,
    endpoints: Endpoints,
}

impl<'a, R: PageRenderer + ?Sized> Orchestrator<'a, R> {
    pub fn new(persister: Persister<'a, R>, endpoints: Endpoints) -> Self {
        Self {
            persister,
            endpoints,
        }
    }

    /// Fetch every artifact for each identifier, in order.
    pub async fn run<'i, I>(&self, ids: I) -> RunSummary
    where
        I: IntoIterator<Item = &'i ItemId>,
    {
        let mut summary = RunSummary::default();
        for id in ids {
            tracing::info!("Processing ItemID: {id}");
            let report = self.process(id).await;
            summary.record(&report);
        }

        tracing::info!(
            "Run complete: {} ItemIDs, {} saved, {} already present, {} missing, {} failed",
            summary.items,
            summary.saved,
            summary.already_existed,
            summary.missed,
            summary.failed
        );
        summary
    }

    /// Fetch the five artifacts for `id`. Never fails as a whole.
    pub async fn process(&self, id: &ItemId) -> ItemReport {
        let mut fetches = Vec::with_capacity(Category::ALL.len());

        for category in Category::ALL {
            let status = match self.fetch(category, id).await {
                Ok(status) => status,
                Err(e) => {
                    tracing::error!("Fetching {category} for ItemID {id} failed: {e:#}");
                    FetchStatus::Failed(format!("{e:#}"))
                }
            };
            fetches.push((category, status));
        }

        ItemReport {
            id: id.clone(),
            fetches,
        }
    }

    async fn fetch(&self, category: Category, id: &ItemId) -> Result<FetchStatus> {
        if category.is_binary() {
            return self.fetch_original(id).await;
        }
        let url = self.endpoints.url_for(category, id);
        let outcome = self.persister.save_text(&url, category, id).await?;
        Ok(outcome.into())
    }

    async fn fetch_original(&self, id: &ItemId) -> Result<FetchStatus> {
        // Skip the viewer render entirely when the PDF is already archived.
        if let Slot::Existing(path) = self.persister.store().prepare(Category::Pdf, id)? {
            tracing::info!("File already exists: {}", path.display());
            return Ok(FetchStatus::AlreadyExists);
        }

        let page_url = self.endpoints.url_for(Category::Pdf, id);
        let html = self.persister.renderer().render(&page_url).await?;

        let target = match extract_embedded_url(&html) {
            Ok(target) => target,
            Err(miss) => {
                match miss {
                    LocatorMiss::NoEmbed => tracing::warn!("No <embed> tag found for ItemID {id}"),
                    LocatorMiss::NoUrlParam => tracing::warn!("No valid PDF URL for ItemID {id}"),
                }
                return Ok(FetchStatus::NotFound(miss));
            }
        };

        let pdf_url = resolve_against(&page_url, &target)
            .ok_or_else(|| anyhow!("unusable PDF URL {target:?} for ItemID {id}"))?;

        let outcome = self
            .persister
            .save_binary(&pdf_url, Category::Pdf, id)
            .await?;
        Ok(outcome.into())
    }
}
