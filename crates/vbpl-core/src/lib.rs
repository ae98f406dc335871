//! vbpl-core — identifier harvesting, embed-URL extraction, and the
//! write-once artifact layout used by `vbpl-archiver`.

pub mod harvest;
pub mod locator;
pub mod store;
pub mod types;

pub use harvest::{harvest_dir, harvest_markup, item_id_from_href, Harvest, ITEM_ID_KEY};
pub use locator::{extract_embedded_url, resolve_against, LocatorMiss};
pub use store::{part_path, ArtifactStore, Slot, LISTING_DIR};
pub use types::*;
