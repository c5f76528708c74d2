//! Manifest generation pipeline
//!
//! Validate → resolve revision → scan → fingerprint → assemble → emit.
//! Each step runs once; the first failure ends the run before anything is
//! handed to the writer.

use crate::error::{LavenderError, Stage};
use crate::fs::ResourceFs;
use crate::manifest::properties::ManifestWriter;
use crate::manifest::Manifest;
use crate::module::{ModuleDescriptor, ModuleLayout};
use crate::scm::RevisionResolver;
use crate::tree::filter::PathFilter;
use crate::tree::hasher::{ContentFingerprinter, Fingerprint};
use crate::tree::walker::{FileEntry, ScannerConfig, TreeScanner};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Fingerprints of the resources under a source root, in relative-path order
pub type ResourceIndex = Vec<(String, Fingerprint)>;

/// Builds manifests for modules
pub struct ManifestBuilder {
    fs: Arc<dyn ResourceFs>,
    resolver: RevisionResolver,
    workers: usize,
    scanner_config: ScannerConfig,
}

impl ManifestBuilder {
    pub fn new(fs: Arc<dyn ResourceFs>, resolver: RevisionResolver) -> Self {
        Self {
            fs,
            resolver,
            workers: 1,
            scanner_config: ScannerConfig::default(),
        }
    }

    /// Number of files fingerprinted concurrently (at least one)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_scanner_config(mut self, config: ScannerConfig) -> Self {
        self.scanner_config = config;
        self
    }

    /// Run the whole pipeline and hand the manifest to `writer`.
    #[instrument(skip_all, fields(module = %module.name()))]
    pub async fn generate(
        &self,
        module: &ModuleDescriptor,
        layout: &ModuleLayout,
        writer: &dyn ManifestWriter,
    ) -> Result<Manifest, LavenderError> {
        let manifest = self.build(module, layout).await?;
        writer.write(&manifest)?;
        Ok(manifest)
    }

    /// Run every step except emitting.
    pub async fn build(
        &self,
        module: &ModuleDescriptor,
        layout: &ModuleLayout,
    ) -> Result<Manifest, LavenderError> {
        let start = Instant::now();
        info!("webapp: {}", module.is_webapp());

        let filter = self.validate(module, layout)?;

        let revision = self
            .resolver
            .resolve(module.scm_connection(), layout.base_dir())
            .await?;

        let index = self.index(&layout.source_dir(), &filter).await?;

        let mut manifest = Manifest::new(module, &revision);
        for (relative_path, fingerprint) in index {
            if manifest
                .insert_resource(relative_path.clone(), fingerprint)
                .is_some()
            {
                return Err(LavenderError::Traversal {
                    path: layout.source_dir().join(&relative_path),
                    reason: format!("duplicate resource path '{}'", relative_path),
                });
            }
        }

        info!(
            resources = manifest.resources().len(),
            revision = %revision.revision,
            duration_ms = start.elapsed().as_millis(),
            "Manifest assembled"
        );
        Ok(manifest)
    }

    /// Check the legacy properties guard and compile the path filter.
    ///
    /// # Errors
    /// - [`LavenderError::LegacyProperties`] if the legacy file has content
    /// - [`LavenderError::InvalidGlob`] for a bad include/exclude pattern
    pub fn validate(
        &self,
        module: &ModuleDescriptor,
        layout: &ModuleLayout,
    ) -> Result<PathFilter, LavenderError> {
        let legacy = layout.legacy_properties_path();
        let contents = self
            .fs
            .read_to_string(&legacy)
            .map_err(|e| LavenderError::io(Stage::Validation, &legacy, e))?;
        if let Some(contents) = contents {
            if !contents.trim().is_empty() {
                return Err(LavenderError::LegacyProperties(legacy));
            }
            debug!(path = %legacy.display(), "Ignoring empty legacy properties file");
        }

        PathFilter::compile(module.include_patterns(), module.exclude_patterns())
    }

    /// Scan `source_dir` and fingerprint every accepted file.
    pub async fn index(
        &self,
        source_dir: &Path,
        filter: &PathFilter,
    ) -> Result<ResourceIndex, LavenderError> {
        let entries = TreeScanner::with_config(self.fs.as_ref(), self.scanner_config.clone())
            .scan(source_dir, filter)?;
        info!(
            source_dir = %source_dir.display(),
            files = entries.len(),
            "Scanned resources"
        );
        self.fingerprint_all(entries).await
    }

    /// Fingerprint entries on blocking tasks, at most `workers` at a time.
    ///
    /// Results keep the input order; the first failure ends the run.
    async fn fingerprint_all(&self, entries: Vec<FileEntry>) -> Result<ResourceIndex, LavenderError> {
        let tasks = entries.into_iter().map(|entry| {
            let fs = Arc::clone(&self.fs);
            async move {
                let location = entry.location.clone();
                let fingerprint = tokio::task::spawn_blocking(move || {
                    ContentFingerprinter::fingerprint(fs.as_ref(), &entry.location)
                        .map(|fingerprint| (entry.relative_path, fingerprint))
                })
                .await
                .map_err(|e| {
                    LavenderError::io(
                        Stage::Hashing,
                        location,
                        std::io::Error::new(std::io::ErrorKind::Other, e),
                    )
                })??;
                debug!(path = %fingerprint.0, fingerprint = %fingerprint.1, "Fingerprinted");
                Ok::<_, LavenderError>(fingerprint)
            }
        });

        stream::iter(tasks)
            .buffered(self.workers)
            .try_collect()
            .await
    }
}
