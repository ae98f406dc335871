//! Environment readiness check.

use anyhow::Result;
use vbpl_core::{ArtifactStore, Category};

use crate::config::ArchiverConfig;
use crate::renderer::chromium::find_chromium;

/// Check Chromium availability and the archive layout.
pub async fn run(config: &ArchiverConfig) -> Result<()> {
    println!("vbpl-archiver doctor");
    println!("====================");
    println!();

    let chromium = find_chromium(config.chromium_path.as_deref());
    match &chromium {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!("[!!] Chromium NOT found. Install Chrome or pass --chromium <PATH>."),
    }

    let store = ArtifactStore::new(&config.root);
    let listing = store.listing_dir();
    let listing_ok = listing.is_dir();
    if listing_ok {
        let pages = std::fs::read_dir(&listing)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .count();
        println!("[OK] Listing directory {} ({pages} pages)", listing.display());
    } else {
        println!("[!!] Listing directory missing: {}", listing.display());
    }

    for category in Category::ALL {
        let dir = store.category_dir(category);
        let saved = std::fs::read_dir(&dir)
            .map(|entries| entries.filter_map(|e| e.ok()).count())
            .unwrap_or(0);
        println!("     {:<9} {saved} files", category.dir_name());
    }

    println!();
    if chromium.is_some() && listing_ok {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }
    Ok(())
}
