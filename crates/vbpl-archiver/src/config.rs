//! Configuration loading and resolution.
//!
//! Each setting resolves as: explicit CLI value, then environment variable,
//! then built-in default.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// Default archive root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "BoPhapDienDienTu";
/// Default portal base URL.
pub const DEFAULT_BASE_URL: &str = "https://vbpl.vn";
/// Site/category code used by the property, history and original-document pages.
pub const DEFAULT_DVID: u32 = 13;
/// Element whose presence marks a rendered page as ready.
pub const DEFAULT_CONTENT_SELECTOR: &str = "body";

/// Runtime settings for an archiving run.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiverConfig {
    /// Archive root holding `demuc/` and the output directories.
    pub root: PathBuf,
    /// Portal base URL without trailing slash.
    pub base_url: String,
    /// Site/category code.
    pub dvid: u32,
    /// CSS selector awaited after navigation.
    pub content_selector: String,
    /// How long to wait for the content selector before giving up.
    #[serde(with = "millis")]
    pub render_wait: Duration,
    /// Upper bound on a single navigation.
    #[serde(with = "millis")]
    pub navigation_timeout: Duration,
    /// Upper bound on a single PDF download.
    #[serde(with = "millis")]
    pub download_timeout: Duration,
    /// Explicit Chromium binary, if any.
    pub chromium_path: Option<PathBuf>,
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            base_url: DEFAULT_BASE_URL.to_string(),
            dvid: DEFAULT_DVID,
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            render_wait: Duration::from_secs(5),
            navigation_timeout: Duration::from_secs(30),
            download_timeout: Duration::from_secs(60),
            chromium_path: None,
        }
    }
}

impl ArchiverConfig {
    /// Build a config from optional CLI overrides and the environment.
    pub fn resolve(
        root: Option<PathBuf>,
        chromium: Option<PathBuf>,
        render_wait_secs: Option<u64>,
    ) -> Self {
        let mut config = Self::default();

        if let Some(root) = root.or_else(|| env_path("VBPL_ROOT")) {
            config.root = root;
        }
        if let Ok(base) = std::env::var("VBPL_BASE_URL") {
            config.base_url = base.trim_end_matches('/').to_string();
        }
        config.chromium_path = chromium.or_else(|| env_path("VBPL_CHROMIUM_PATH"));
        if let Some(secs) = render_wait_secs {
            config.render_wait = Duration::from_secs(secs);
        }

        config
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}
