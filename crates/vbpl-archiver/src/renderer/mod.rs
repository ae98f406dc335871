//! Renderer abstraction for browser-based page rendering.
//!
//! Defines the `PageRenderer` trait that abstracts over the browser engine
//! (currently Chromium via chromiumoxide). One renderer is one browser
//! session; every render navigates that session's single page.

pub mod chromium;

use anyhow::Result;
use async_trait::async_trait;

/// A browser session that turns URLs into post-script markup.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Navigate to `url` and return the current page markup.
    ///
    /// A page whose content never becomes ready is not an error: the
    /// renderer logs a warning and returns whatever markup is loaded.
    async fn render(&self, url: &str) -> Result<String>;
    /// Release the browser session.
    async fn shutdown(&self) -> Result<()>;
}
