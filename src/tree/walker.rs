//! Resource tree scanner

use crate::error::LavenderError;
use crate::fs::{ResourceFs, ScanRoot};
use crate::tree::filter::PathFilter;
use crate::tree::path;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// A matched resource file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the scan root, `/`-separated
    pub relative_path: String,
    /// Where to read the bytes from
    pub location: PathBuf,
}

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Follow symbolic links (default: true). Cycles are reported as traversal
    /// errors; when disabled, any link under the root is a traversal error.
    pub follow_symlinks: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
        }
    }
}

/// Walks a source root and yields the files accepted by a [`PathFilter`]
pub struct TreeScanner<'a> {
    fs: &'a dyn ResourceFs,
    config: ScannerConfig,
}

impl<'a> TreeScanner<'a> {
    pub fn new(fs: &'a dyn ResourceFs) -> Self {
        Self {
            fs,
            config: ScannerConfig::default(),
        }
    }

    pub fn with_config(fs: &'a dyn ResourceFs, config: ScannerConfig) -> Self {
        Self { fs, config }
    }

    /// Scan `root` and return the matching files sorted by relative path.
    ///
    /// A missing root (or one that is not a directory) yields an empty list;
    /// resource directories are optional. A root that exists but cannot be
    /// read is an error.
    #[instrument(skip(self, root, filter), fields(root = %root.display()))]
    pub fn scan(&self, root: &Path, filter: &PathFilter) -> Result<Vec<FileEntry>, LavenderError> {
        let files = match self.fs.walk_files(root, self.config.follow_symlinks)? {
            ScanRoot::Absent => {
                debug!("Scan root absent, nothing to index");
                return Ok(Vec::new());
            }
            ScanRoot::Files(files) => files,
        };

        let candidates = files.len();
        let mut entries = Vec::new();
        for location in files {
            let relative_path = path::relative_resource_path(root, &location)?;
            if filter.matches(&relative_path) {
                entries.push(FileEntry {
                    relative_path,
                    location,
                });
            } else {
                debug!(path = %relative_path, "Filtered out");
            }
        }

        entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        debug!(candidates, matched = entries.len(), "Scan completed");
        Ok(entries)
    }
}
