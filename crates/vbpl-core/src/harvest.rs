//! Identifier harvesting from saved listing pages.
//!
//! Listing pages (the `demuc/` directory) link to documents through anchors
//! whose `href` carries an `ItemID=<id>` query parameter. The harvester walks
//! every file, collects those anchors, and keeps the first href seen for each
//! identifier.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use scraper::{Html, Selector};

use crate::types::{ArchiveError, ArchiveResult, ItemId};

/// Query key that introduces a document identifier.
pub const ITEM_ID_KEY: &str = "ItemID=";

/// Harvested identifiers in first-seen order, each mapped to the href it came from.
pub type Harvest = IndexMap<ItemId, String>;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

/// Extract the identifier referenced by `href`, if any.
///
/// The fragment is dropped first; the value runs from the last `ItemID=` up
/// to the next `&` or the end of the link.
pub fn item_id_from_href(href: &str) -> Option<ItemId> {
    let link = strip_fragment(href);
    let (_, tail) = link.rsplit_once(ITEM_ID_KEY)?;
    let value = tail.split('&').next().unwrap_or_default();
    ItemId::new(value).ok()
}

fn strip_fragment(href: &str) -> &str {
    href.split_once('#').map_or(href, |(link, _)| link)
}

/// Add every identifier-bearing anchor in `html` to `into`.
///
/// Later links for an identifier already present are discarded. Returns the
/// number of new identifiers.
pub fn harvest_markup(html: &str, into: &mut Harvest) -> usize {
    let doc = Html::parse_document(html);
    let mut added = 0;

    for anchor in doc.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(id) = item_id_from_href(href) else {
            continue;
        };
        if !into.contains_key(&id) {
            into.insert(id, strip_fragment(href).to_string());
            added += 1;
        }
    }

    added
}

/// Harvest identifiers from every regular file in `dir`.
///
/// Files are visited in file-name order. A file that cannot be read as
/// UTF-8 text is logged and skipped; it never aborts the harvest.
pub fn harvest_dir(dir: &Path) -> ArchiveResult<Harvest> {
    if !dir.is_dir() {
        return Err(ArchiveError::ListingDirMissing(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let mut harvest = Harvest::new();
    for path in &files {
        let html = match std::fs::read_to_string(path) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Skipping listing page {}: {e}", path.display());
                continue;
            }
        };
        let added = harvest_markup(&html, &mut harvest);
        tracing::debug!("{}: {added} new ItemIDs", path.display());
    }

    tracing::info!(
        "Harvested {} ItemIDs from {} listing pages",
        harvest.len(),
        files.len()
    );
    Ok(harvest)
}
