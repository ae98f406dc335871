//! Shared fixtures: an in-memory renderer and an archive laid out in a temp dir.

#![allow(dead_code)]

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tempfile::TempDir;
use vbpl_archiver::PageRenderer;
use vbpl_core::ArtifactStore;

/// Renderer that serves canned markup and records every URL it renders.
#[derive(Default)]
pub struct FakeRenderer {
    /// (URL fragment, markup) pairs; the first matching fragment wins.
    pages: Vec<(String, String)>,
    /// URL fragments that make `render` fail.
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, fragment: &str, html: &str) -> Self {
        self.pages.push((fragment.to_string(), html.to_string()));
        self
    }

    pub fn fail_on(mut self, fragment: &str) -> Self {
        self.failing.push(fragment.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PageRenderer for FakeRenderer {
    async fn render(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.failing.iter().any(|f| url.contains(f.as_str())) {
            bail!("simulated browser crash on {url}");
        }
        let html = self
            .pages
            .iter()
            .find(|(f, _)| url.contains(f.as_str()))
            .map(|(_, html)| html.clone())
            .unwrap_or_else(|| format!("<html><body><p>{url}</p></body></html>"));
        Ok(html)
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

/// A temp archive root with an empty `demuc/`.
pub fn archive() -> (TempDir, ArtifactStore) {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path());
    std::fs::create_dir_all(store.listing_dir()).unwrap();
    (dir, store)
}

/// Viewer markup embedding `target` the way the portal does.
pub fn viewer_page(target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!(
        r#"<html><body><div id="divShowPDF"><embed type="application/pdf" src="/pdfjs/web/viewer.html?url={encoded}&amp;zoom=100" width="100%"></div></body></html>"#
    )
}
