//! Chromium-based renderer using chromiumoxide.

use super::PageRenderer;
use crate::config::ArchiverConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Interval between checks for the content selector.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// CDP requests must outlive the navigation timeout; a slow `goto` is
/// cut off by our own timeout first.
const CDP_REQUEST_MARGIN: Duration = Duration::from_secs(10);

fn cdp_request_timeout(navigation_timeout: Duration) -> Duration {
    navigation_timeout + CDP_REQUEST_MARGIN
}

/// Poll `check` every `interval` until it reports true or `limit` elapses.
///
/// Returns whether the condition was met in time.
pub async fn wait_until<F, Fut>(limit: Duration, interval: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let poll = async {
        loop {
            if check().await {
                return;
            }
            tokio::time::sleep(interval).await;
        }
    };
    tokio::time::timeout(limit, poll).await.is_ok()
}

/// Find the Chromium binary path.
pub fn find_chromium(explicit: Option<&Path>) -> Option<PathBuf> {
    // 1. --chromium flag / VBPL_CHROMIUM_PATH (already folded into config)
    if let Some(path) = explicit {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("Configured Chromium path does not exist: {}", path.display());
    }

    // 2. System PATH
    for name in [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
        "chrome",
    ] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 3. Common install locations
    let common: &[&str] = if cfg!(target_os = "macos") {
        &["/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"]
    } else if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ]
    } else {
        &[]
    };
    common.iter().map(PathBuf::from).find(|p| p.exists())
}

/// Headless Chromium session with a single reusable page.
pub struct ChromiumRenderer {
    browser: Mutex<Browser>,
    handler: Mutex<Option<JoinHandle<()>>>,
    page: Page,
    content_selector: String,
    render_wait: Duration,
    navigation_timeout: Duration,
}

impl ChromiumRenderer {
    /// Launch a headless Chromium instance and open its working page.
    pub async fn launch(config: &ArchiverConfig) -> Result<Self> {
        let chrome_path = find_chromium(config.chromium_path.as_deref())
            .context("Chromium not found. Install Chrome or pass --chromium <PATH>.")?;
        tracing::debug!("Launching Chromium at {}", chrome_path.display());

        let browser_config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .request_timeout(cdp_request_timeout(config.navigation_timeout))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("failed to launch Chromium")?;

        // Drive the CDP connection for the lifetime of the browser.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler: {e}");
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("failed to create page")?;

        Ok(Self {
            browser: Mutex::new(browser),
            handler: Mutex::new(Some(handler_task)),
            page,
            content_selector: config.content_selector.clone(),
            render_wait: config.render_wait,
            navigation_timeout: config.navigation_timeout,
        })
    }

    async fn wait_for_content(&self) -> bool {
        wait_until(self.render_wait, POLL_INTERVAL, || async move {
            self.page.find_element(&self.content_selector).await.is_ok()
        })
        .await
    }

    async fn current_html(&self) -> Result<String> {
        let result = self
            .page
            .evaluate("document.documentElement.outerHTML")
            .await
            .context("failed to get HTML")?;

        result
            .into_value()
            .map_err(|e| anyhow::anyhow!("failed to convert HTML result: {e:?}"))
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn render(&self, url: &str) -> Result<String> {
        match tokio::time::timeout(self.navigation_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(e).with_context(|| format!("navigation to {url} failed")),
            Err(_) => tracing::debug!(
                "navigation to {url} still loading after {}ms",
                self.navigation_timeout.as_millis()
            ),
        }

        if !self.wait_for_content().await {
            tracing::warn!("Warning: {url} might not have fully loaded.");
        }

        self.current_html().await
    }

    async fn shutdown(&self) -> Result<()> {
        let mut browser = self.browser.lock().await;
        let closed = browser.close().await;
        let _ = browser.wait().await;
        if let Some(task) = self.handler.lock().await.take() {
            task.abort();
        }
        closed.context("failed to close Chromium")?;
        tracing::debug!("Chromium session closed");
        Ok(())
    }
}
