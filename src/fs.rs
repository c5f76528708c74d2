//! Filesystem context
//!
//! All reads and the single manifest write go through a [`ResourceFs`] value
//! that is passed explicitly to the scanner, the fingerprinter, the legacy
//! guard and the writer. [`LocalFs`] talks to the disk; [`MemoryFs`] keeps
//! everything in memory for tests.

use crate::error::{LavenderError, Stage};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of walking a scan root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanRoot {
    /// Root does not exist or is not a directory
    Absent,
    /// Regular files below the root, depth-first, lexicographic per directory
    Files(Vec<PathBuf>),
}

/// Filesystem operations needed to build and emit a manifest
pub trait ResourceFs: Send + Sync {
    /// Walk `root` and collect every regular file below it.
    fn walk_files(&self, root: &Path, follow_symlinks: bool) -> Result<ScanRoot, LavenderError>;

    /// Open a file for streaming reads.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Read a text file; `None` if it does not exist.
    fn read_to_string(&self, path: &Path) -> io::Result<Option<String>>;

    /// Write a file, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Disk-backed filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl ResourceFs for LocalFs {
    fn walk_files(&self, root: &Path, follow_symlinks: bool) -> Result<ScanRoot, LavenderError> {
        let metadata = match std::fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ScanRoot::Absent),
            Err(e) => return Err(LavenderError::io(Stage::Scanning, root, e)),
        };
        if !metadata.is_dir() {
            return Ok(ScanRoot::Absent);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(follow_symlinks)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| walk_error(root, e))?;
            // Skipping a link would leave the manifest incomplete
            if entry.depth() > 0 && entry.path_is_symlink() && !follow_symlinks {
                return Err(LavenderError::Traversal {
                    path: entry.into_path(),
                    reason: "symbolic link found while not following links".to_string(),
                });
            }
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        Ok(ScanRoot::Files(files))
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(std::fs::File::open(path)?))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    }
}

fn walk_error(root: &Path, err: walkdir::Error) -> LavenderError {
    let path = err.path().unwrap_or(root).to_path_buf();
    if let Some(ancestor) = err.loop_ancestor() {
        return LavenderError::Traversal {
            path,
            reason: format!("symlink cycle back to {}", ancestor.display()),
        };
    }
    match err.into_io_error() {
        Some(source) => LavenderError::io(Stage::Scanning, path, source),
        None => LavenderError::Traversal {
            path,
            reason: "directory walk failed".to_string(),
        },
    }
}

/// In-memory filesystem
///
/// Directories exist implicitly as ancestors of files, or explicitly via
/// [`MemoryFs::create_dir`].
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
    unreadable: RwLock<BTreeSet<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.write().insert(path.into(), contents.into());
    }

    /// Register an empty directory.
    pub fn create_dir(&self, path: impl Into<PathBuf>) {
        self.dirs.write().insert(path.into());
    }

    /// Make reads of an existing file fail with `PermissionDenied`.
    pub fn mark_unreadable(&self, path: impl Into<PathBuf>) {
        self.unreadable.write().insert(path.into());
    }

    /// Contents of a file, if present.
    pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().get(path).cloned()
    }

    /// Number of files currently stored.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    fn is_dir(&self, path: &Path) -> bool {
        if self.dirs.read().iter().any(|d| d.starts_with(path)) {
            return true;
        }
        self.files
            .read()
            .keys()
            .any(|f| f != path && f.starts_with(path))
    }

    fn check_readable(&self, path: &Path) -> io::Result<()> {
        if self.unreadable.read().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        Ok(())
    }
}

impl ResourceFs for MemoryFs {
    fn walk_files(&self, root: &Path, _follow_symlinks: bool) -> Result<ScanRoot, LavenderError> {
        if !self.is_dir(root) {
            return Ok(ScanRoot::Absent);
        }
        // Path ordering is component-wise, which matches a sorted depth-first walk
        let files = self
            .files
            .read()
            .keys()
            .filter(|f| *f != root && f.starts_with(root))
            .cloned()
            .collect();
        Ok(ScanRoot::Files(files))
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        self.check_readable(path)?;
        let contents = self.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })?;
        Ok(Box::new(Cursor::new(contents)))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<Option<String>> {
        self.check_readable(path)?;
        match self.get(path) {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            None => Ok(None),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.insert(path, contents.to_vec());
        Ok(())
    }
}
