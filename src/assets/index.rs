use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ShowcaseError, ShowcaseResult};

/// One converted icon: where it came from and where it was written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Remote SVG URL.
    pub source: String,
    /// Local raster file.
    pub path: PathBuf,
    /// FNV-1a digest of the SVG markup that produced `path`.
    pub content_hash: String,
    /// Seconds since the Unix epoch when the icon was converted.
    pub fetched_at_unix: u64,
}

/// Ordered record of previously converted icons.
///
/// When present and non-empty it is authoritative: acquisition returns its paths without
/// touching the network and without checking that the files still exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconIndex {
    pub version: u32,
    pub entries: Vec<IndexEntry>,
}

impl Default for IconIndex {
    fn default() -> Self {
        Self {
            version: Self::VERSION,
            entries: Vec::new(),
        }
    }
}

impl IconIndex {
    pub const VERSION: u32 = 1;

    pub fn push(&mut self, entry: IndexEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Local paths in acquisition order, duplicates included.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    /// Read an index file. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> ShowcaseResult<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let f = File::open(path)
            .with_context(|| format!("open icon index '{}'", path.display()))?;
        let index: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            ShowcaseError::serde(format!("parse icon index '{}': {e}", path.display()))
        })?;
        if index.version != Self::VERSION {
            return Err(ShowcaseError::validation(format!(
                "icon index '{}' has version {}, expected {}",
                path.display(),
                index.version,
                Self::VERSION
            )));
        }
        Ok(Some(index))
    }

    /// Write the index as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> ShowcaseResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create index dir '{}'", parent.display()))?;
        }
        let f = File::create(path)
            .with_context(|| format!("create icon index '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, self).map_err(|e| {
            ShowcaseError::serde(format!("write icon index '{}': {e}", path.display()))
        })?;
        w.flush()
            .with_context(|| format!("flush icon index '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/index.rs"]
mod tests;
