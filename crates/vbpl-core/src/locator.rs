//! Locating the original-document URL inside a rendered viewer page.
//!
//! The original-document page shows the PDF through an `<embed>` whose
//! `src` points at a viewer with the real file passed as `url=<encoded>`.

use std::fmt;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;

static EMBED_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<embed\s+[^>]*src="([^"]+)""#).expect("valid regex")
});

static URL_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"url=([^"\s&]+)"#).expect("valid regex"));

/// Why no document URL could be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorMiss {
    /// The markup has no `<embed ... src="...">` element.
    NoEmbed,
    /// An embed exists but its `src` carries no `url=` parameter.
    NoUrlParam,
}

impl fmt::Display for LocatorMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEmbed => write!(f, "no <embed> tag found"),
            Self::NoUrlParam => write!(f, "no url= parameter in <embed> src"),
        }
    }
}

/// Extract and decode the document URL from rendered markup.
pub fn extract_embedded_url(html: &str) -> Result<String, LocatorMiss> {
    let src = EMBED_SRC
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or(LocatorMiss::NoEmbed)?
        .as_str();

    let raw = URL_PARAM
        .captures(src)
        .and_then(|c| c.get(1))
        .ok_or(LocatorMiss::NoUrlParam)?
        .as_str();

    Ok(decode_component(raw))
}

fn decode_component(raw: &str) -> String {
    // Percent-decoding only: `+` and `=` are literal, as in decodeURIComponent.
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Resolve `target` against the page it was found on.
///
/// Absolute targets are returned unchanged; relative ones are joined onto
/// `page_url`. Returns `None` when neither parses.
pub fn resolve_against(page_url: &str, target: &str) -> Option<String> {
    if let Ok(abs) = Url::parse(target) {
        return Some(abs.to_string());
    }
    Url::parse(page_url)
        .and_then(|base| base.join(target))
        .map(|u| u.to_string())
        .ok()
}
