//! Full archiving run: harvest identifiers, then fetch every artifact.

use anyhow::{Context, Result};
use vbpl_core::{harvest_dir, ArtifactStore};

use crate::config::ArchiverConfig;
use crate::endpoints::Endpoints;
use crate::http_client::HttpClient;
use crate::persist::Persister;
use crate::pipeline::{Orchestrator, RunSummary};
use crate::renderer::chromium::ChromiumRenderer;
use crate::renderer::PageRenderer;

/// Harvest `demuc/`, launch the browser session, and process every ItemID.
///
/// The browser is shut down on completion, on error, and on Ctrl-C.
pub async fn run(config: &ArchiverConfig, limit: Option<usize>, json: bool) -> Result<()> {
    let store = ArtifactStore::new(&config.root);
    let harvest = harvest_dir(&store.listing_dir())
        .with_context(|| format!("cannot harvest {}", store.listing_dir().display()))?;
    let take = limit.unwrap_or(harvest.len());

    let renderer = ChromiumRenderer::launch(config).await?;
    let http = HttpClient::new(config.download_timeout);
    let orchestrator = Orchestrator::new(
        Persister::new(&store, &renderer, &http),
        Endpoints::new(&config.base_url, config.dvid),
    );

    let summary: Option<RunSummary> = tokio::select! {
        summary = orchestrator.run(harvest.keys().take(take)) => Some(summary),
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted; closing browser");
            None
        }
    };

    if let Err(e) = renderer.shutdown().await {
        tracing::warn!("Browser shutdown: {e:#}");
    }

    if let (Some(summary), true) = (summary, json) {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
