//! Path canonicalization and relative-path utilities

use crate::error::{LavenderError, Stage};
use std::path::{Component, Path, PathBuf};

/// Canonicalize a directory the user pointed us at
///
/// Uses dunce so Windows paths stay in their familiar form rather than the
/// `\\?\` verbatim form.
pub fn canonicalize_dir(path: &Path) -> Result<PathBuf, LavenderError> {
    dunce::canonicalize(path).map_err(|e| LavenderError::io(Stage::Validation, path, e))
}

/// Compute the manifest path of `file` relative to `root`
///
/// The result:
/// 1. Uses `/` as separator on every host
/// 2. Keeps every name exactly as stored on disk
/// 3. Contains only normal components (no `.`/`..`)
pub fn relative_resource_path(root: &Path, file: &Path) -> Result<String, LavenderError> {
    let relative = file
        .strip_prefix(root)
        .map_err(|_| LavenderError::Traversal {
            path: file.to_path_buf(),
            reason: format!("not below scan root {}", root.display()),
        })?;

    let mut segments: Vec<&str> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                let name = name.to_str().ok_or_else(|| LavenderError::Traversal {
                    path: file.to_path_buf(),
                    reason: "file name is not valid UTF-8".to_string(),
                })?;
                segments.push(name);
            }
            Component::CurDir => {}
            _ => {
                return Err(LavenderError::Traversal {
                    path: file.to_path_buf(),
                    reason: "unexpected path component".to_string(),
                })
            }
        }
    }

    if segments.is_empty() {
        return Err(LavenderError::Traversal {
            path: file.to_path_buf(),
            reason: "path is the scan root itself".to_string(),
        });
    }

    Ok(segments.join("/"))
}
