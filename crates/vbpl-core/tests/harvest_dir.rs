//! Directory-level harvesting over saved listing pages.

use std::fs;

use tempfile::TempDir;
use vbpl_core::{harvest_dir, ArtifactStore};

fn listing_root() -> (TempDir, ArtifactStore) {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path());
    fs::create_dir_all(store.listing_dir()).unwrap();
    (dir, store)
}

#[test]
fn duplicate_links_collapse_to_one_identifier() {
    let (_dir, store) = listing_root();
    fs::write(
        store.listing_dir().join("demuc_1.html"),
        r#"<html><body>
             <a href="/TW/Pages/vbpq-toanvan.aspx?ItemID=111&Keyword=">Luật</a>
             <a href="/TW/Pages/vbpq-toanvan.aspx?ItemID=111&Keyword=test#x">Luật (bản khác)</a>
           </body></html>"#,
    )
    .unwrap();

    let harvest = harvest_dir(&store.listing_dir()).unwrap();
    let ids: Vec<&str> = harvest.keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["111"]);
    assert_eq!(
        harvest[0],
        "/TW/Pages/vbpq-toanvan.aspx?ItemID=111&Keyword="
    );
}

#[test]
fn unreadable_file_does_not_abort_harvest() {
    let (_dir, store) = listing_root();
    // Invalid UTF-8 sorts first and must be skipped.
    fs::write(store.listing_dir().join("a_broken.html"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();
    fs::write(
        store.listing_dir().join("b_ok.html"),
        r#"<a href="?ItemID=42&Keyword=">ok</a>"#,
    )
    .unwrap();

    let harvest = harvest_dir(&store.listing_dir()).unwrap();
    let ids: Vec<&str> = harvest.keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["42"]);
}

#[test]
fn files_are_visited_in_name_order_and_subdirs_skipped() {
    let (_dir, store) = listing_root();
    let listing = store.listing_dir();
    fs::write(listing.join("02.html"), r#"<a href="?ItemID=2">b</a><a href="?ItemID=1&z=1">a2</a>"#).unwrap();
    fs::write(listing.join("01.html"), r#"<a href="?ItemID=1">a</a>"#).unwrap();
    fs::create_dir(listing.join("nested")).unwrap();
    fs::write(listing.join("nested/03.html"), r#"<a href="?ItemID=3">c</a>"#).unwrap();

    let harvest = harvest_dir(&listing).unwrap();
    let ids: Vec<&str> = harvest.keys().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(harvest[0], "?ItemID=1");
}

#[test]
fn empty_listing_yields_nothing() {
    let (_dir, store) = listing_root();
    fs::write(store.listing_dir().join("index.html"), "<p>Không có văn bản</p>").unwrap();
    assert!(harvest_dir(&store.listing_dir()).unwrap().is_empty());
}
