//! Include/exclude glob filtering of resource paths.
//!
//! Patterns are matched against the path relative to the scan root, using `/`
//! as separator on every host:
//! - `*` matches within one path segment
//! - `**` matches across segments (`**/*.txt` also matches `a.txt`)
//! - `?`, `[abc]` and `{png,jpg}` work as usual
//!
//! An empty include list includes everything. Excludes always win.

use crate::error::LavenderError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Split a comma-separated pattern list, trimming items and dropping empty ones.
///
/// `""` yields an empty list, which for includes means "match everything".
pub fn split_patterns(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Compiled include/exclude predicate over relative paths
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: Vec<String>,
    exclude: Vec<String>,
    include_set: Option<GlobSet>,
    exclude_set: Option<GlobSet>,
}

impl PathFilter {
    /// Compile include and exclude patterns.
    ///
    /// # Errors
    /// Returns [`LavenderError::InvalidGlob`] for the first unparsable pattern.
    pub fn compile(include: &[String], exclude: &[String]) -> Result<Self, LavenderError> {
        Ok(Self {
            include: include.to_vec(),
            exclude: exclude.to_vec(),
            include_set: build_set(include)?,
            exclude_set: build_set(exclude)?,
        })
    }

    /// Filter that accepts every path.
    pub fn match_all() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            include_set: None,
            exclude_set: None,
        }
    }

    /// Check whether a relative path is accepted.
    pub fn matches(&self, relative_path: &str) -> bool {
        let included = match &self.include_set {
            Some(set) => set.is_match(relative_path),
            None => true,
        };
        let excluded = match &self.exclude_set {
            Some(set) => set.is_match(relative_path),
            None => false,
        };
        included && !excluded
    }

    pub fn include_patterns(&self) -> &[String] {
        &self.include
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude
    }
}

fn build_set(patterns: &[String]) -> Result<Option<GlobSet>, LavenderError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|e| LavenderError::InvalidGlob {
                pattern: pattern.clone(),
                reason: e.kind().to_string(),
            })?;
        builder.add(glob);
    }

    let set = builder.build().map_err(|e| LavenderError::InvalidGlob {
        pattern: patterns.join(","),
        reason: e.to_string(),
    })?;
    Ok(Some(set))
}
