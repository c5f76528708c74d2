//! Resource manifest
//!
//! A flat, ordered key/value mapping: a fixed metadata block keyed under
//! `scm.<name>` followed by one `index.<relative path>` entry per resource.
//! Every index key carries the `index.` prefix, so a resource whose path
//! itself starts with `scm.` still cannot collide with a metadata key.

pub mod builder;
pub mod properties;

use crate::module::ModuleDescriptor;
use crate::scm::RevisionInfo;
use crate::tree::hasher::Fingerprint;
use std::collections::BTreeMap;

pub const INDEX_PREFIX: &str = "index.";
pub const SCM_PREFIX: &str = "scm.";

/// Generated manifest for one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    metadata: Vec<(String, String)>,
    index: BTreeMap<String, Fingerprint>,
}

impl Manifest {
    /// Start a manifest with the metadata block for `module` at `revision`.
    pub fn new(module: &ModuleDescriptor, revision: &RevisionInfo) -> Self {
        let base = format!("{}{}", SCM_PREFIX, module.name());
        let key = |suffix: &str| format!("{}.{}", base, suffix);

        let metadata = vec![
            (base.clone(), module.scm_connection().to_string()),
            (key("devel"), module.scm_devel_connection().to_string()),
            (key("path"), module.source_root().to_string()),
            (key("tag"), revision.revision.clone()),
            (key("includes"), module.include_patterns().join(",")),
            (key("excludes"), module.exclude_patterns().join(",")),
            (
                key("resourcePathPrefix"),
                module.resource_path_prefix().to_string(),
            ),
        ];

        Self {
            metadata,
            index: BTreeMap::new(),
        }
    }

    /// Record a resource fingerprint. Returns the previous fingerprint if the
    /// path was already present.
    pub fn insert_resource(
        &mut self,
        relative_path: impl Into<String>,
        fingerprint: Fingerprint,
    ) -> Option<Fingerprint> {
        self.index.insert(relative_path.into(), fingerprint)
    }

    /// Indexed resources, sorted by relative path
    pub fn resources(&self) -> &BTreeMap<String, Fingerprint> {
        &self.index
    }

    /// All entries in output order: metadata block, then index entries.
    pub fn entries(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        let metadata = self
            .metadata
            .iter()
            .map(|(key, value)| (key.clone(), value.as_str()));
        let index = self
            .index
            .iter()
            .map(|(path, fingerprint)| (index_key(path), fingerprint.as_str()));
        metadata.chain(index)
    }

    /// Look up a value by its full key.
    pub fn get(&self, key: &str) -> Option<&str> {
        if let Some(path) = key.strip_prefix(INDEX_PREFIX) {
            return self.index.get(path).map(Fingerprint::as_str);
        }
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.metadata.len() + self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Manifest key for a resource path
pub fn index_key(relative_path: &str) -> String {
    format!("{}{}", INDEX_PREFIX, relative_path)
}
