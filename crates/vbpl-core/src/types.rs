//! Core data types: document identifiers and artifact categories.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Opaque document identifier taken from the `ItemID` query parameter.
///
/// Never empty and never contains `&`, `#`, or a path separator, so it
/// always names a single file inside its category directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Validate and wrap an identifier.
    pub fn new(raw: impl Into<String>) -> ArchiveResult<Self> {
        let raw = raw.into();
        if raw.is_empty() || raw.contains(['&', '#', '/', '\\']) {
            return Err(ArchiveError::InvalidItemId(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ItemId {
    type Error = ArchiveError;

    fn try_from(raw: String) -> ArchiveResult<Self> {
        Self::new(raw)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// The kind of artifact saved for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Full document text.
    FullText,
    /// Document properties (issuer, dates, status).
    Property,
    /// Amendment history.
    History,
    /// Related documents.
    Related,
    /// Original signed document, downloaded as a PDF.
    Pdf,
}

impl Category {
    /// All categories in fetch order.
    pub const ALL: [Category; 5] = [
        Category::FullText,
        Category::Property,
        Category::History,
        Category::Related,
        Category::Pdf,
    ];

    /// Sub-directory under the archive root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::FullText => "vbpl",
            Self::Property => "property",
            Self::History => "history",
            Self::Related => "related",
            Self::Pdf => "pdf",
        }
    }

    /// Deterministic file name for `id` in this category.
    pub fn file_name(self, id: &ItemId) -> String {
        match self {
            Self::FullText => format!("full_{id}.html"),
            Self::Property => format!("p_{id}.html"),
            Self::History => format!("h_{id}.html"),
            Self::Related => format!("r_{id}.html"),
            Self::Pdf => format!("pdf_{id}.pdf"),
        }
    }

    /// Whether the artifact is downloaded as raw bytes rather than rendered markup.
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Pdf)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullText => write!(f, "full text"),
            Self::Property => write!(f, "properties"),
            Self::History => write!(f, "history"),
            Self::Related => write!(f, "related documents"),
            Self::Pdf => write!(f, "original document"),
        }
    }
}

/// Errors raised by the core library.
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid ItemID: {0:?}")]
    InvalidItemId(String),

    #[error("Listing directory not found: {}", .0.display())]
    ListingDirMissing(PathBuf),
}

/// Convenience result type.
pub type ArchiveResult<T> = Result<T, ArchiveError>;
