//! List harvested identifiers without fetching anything.

use anyhow::Result;
use vbpl_core::{harvest_dir, ArtifactStore};

use crate::config::ArchiverConfig;

pub async fn run(config: &ArchiverConfig, json: bool) -> Result<()> {
    let store = ArtifactStore::new(&config.root);
    let harvest = harvest_dir(&store.listing_dir())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&harvest)?);
        return Ok(());
    }

    for (id, href) in &harvest {
        println!("{id}\t{href}");
    }
    Ok(())
}
