//! Shared test utilities for integration tests
//!
//! Module trees are laid out on a real temporary directory and read through
//! `LocalFs`; version control is replaced by in-test providers.

use async_trait::async_trait;
use lavender::error::ScmError;
use lavender::fs::{LocalFs, ResourceFs};
use lavender::manifest::builder::ManifestBuilder;
use lavender::module::{ModuleDescriptor, ModuleLayout, Packaging};
use lavender::scm::{InfoItem, InfoResult, RevisionResolver, ScmProvider, ScmRepository};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Provider answering every request with a canned outcome
pub enum FakeScm {
    Revision(&'static str),
    NoItems,
    Failure(&'static str),
    Transport,
    Hang,
}

#[async_trait]
impl ScmProvider for FakeScm {
    async fn info(&self, _: &ScmRepository, _: &Path) -> Result<InfoResult, ScmError> {
        match self {
            FakeScm::Revision(revision) => Ok(InfoResult::success(vec![InfoItem {
                revision: revision.to_string(),
            }])),
            FakeScm::NoItems => Ok(InfoResult::success(Vec::new())),
            FakeScm::Failure(message) => Ok(InfoResult {
                success: false,
                items: vec![InfoItem {
                    revision: "stale".to_string(),
                }],
                message: message.to_string(),
            }),
            FakeScm::Transport => Err(ScmError::Transport("connection refused".to_string())),
            FakeScm::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(InfoResult::success(Vec::new()))
            }
        }
    }
}

/// Write `contents` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Library module `foo` under a fresh temp dir with `a.txt`, `b/c.txt`, `b/d.tmp`.
pub fn library_module() -> (TempDir, ModuleLayout) {
    let temp_dir = TempDir::new().unwrap();
    let layout = ModuleLayout::new(temp_dir.path(), "target", "foo", Packaging::Library);
    let source = layout.source_dir();
    write_file(&source, "a.txt", "alpha");
    write_file(&source, "b/c.txt", "gamma");
    write_file(&source, "b/d.tmp", "delta");
    (temp_dir, layout)
}

pub fn descriptor(packaging: Packaging, includes: &[&str], excludes: &[&str]) -> ModuleDescriptor {
    let to_vec = |patterns: &[&str]| patterns.iter().map(|p| p.to_string()).collect();
    ModuleDescriptor::new(
        "foo",
        packaging,
        "scm:git:https://example.com/foo.git",
        "scm:git:ssh://git@example.com/foo.git",
        to_vec(includes),
        to_vec(excludes),
    )
}

pub fn local_fs() -> Arc<dyn ResourceFs> {
    Arc::new(LocalFs)
}

pub fn builder(scm: FakeScm) -> ManifestBuilder {
    let resolver = RevisionResolver::new(Arc::new(scm)).with_timeout(Duration::from_millis(200));
    ManifestBuilder::new(local_fs(), resolver).with_workers(4)
}
