//! On-disk artifact layout with write-once semantics.
//!
//! Every artifact lives at `<root>/<category dir>/<file name>`. The presence
//! of that path is the only existence check: an artifact is never refetched
//! or rewritten once it is there. Writes go through a sibling `.part` file
//! and are renamed into place, so an interrupted run never leaves a
//! truncated file under the final name.

use std::path::{Path, PathBuf};

use crate::types::{ArchiveResult, Category, ItemId};

/// Directory (under the root) holding the pre-supplied listing pages.
pub const LISTING_DIR: &str = "demuc";

/// Result of preparing the target path for an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// The artifact is already saved; nothing to do.
    Existing(PathBuf),
    /// The artifact is absent and its directory exists.
    Vacant(PathBuf),
}

impl Slot {
    pub fn path(&self) -> &Path {
        match self {
            Self::Existing(p) | Self::Vacant(p) => p,
        }
    }
}

/// Root of the local archive tree.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the listing pages to harvest.
    pub fn listing_dir(&self) -> PathBuf {
        self.root.join(LISTING_DIR)
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// Final path of the artifact for (`category`, `id`).
    pub fn path_for(&self, category: Category, id: &ItemId) -> PathBuf {
        self.category_dir(category).join(category.file_name(id))
    }

    /// Create the category directory if needed and report whether the
    /// artifact is already present.
    pub fn prepare(&self, category: Category, id: &ItemId) -> ArchiveResult<Slot> {
        std::fs::create_dir_all(self.category_dir(category))?;
        let path = self.path_for(category, id);
        if path.exists() {
            Ok(Slot::Existing(path))
        } else {
            Ok(Slot::Vacant(path))
        }
    }

    /// Write `text` to `path` through a temporary `.part` file.
    pub fn write_text(&self, path: &Path, text: &str) -> ArchiveResult<()> {
        let part = part_path(path);
        if let Err(e) = std::fs::write(&part, text) {
            let _ = std::fs::remove_file(&part);
            return Err(e.into());
        }
        std::fs::rename(&part, path)?;
        Ok(())
    }
}

/// Temporary sibling used while an artifact is being written.
pub fn part_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}
