//! `.properties` rendering and the manifest writer
//!
//! Output follows the `java.util.Properties` text conventions so existing
//! consumers can load it, except that no timestamp comment is written: the
//! same tree and revision must produce the same bytes.

use crate::error::{LavenderError, Stage};
use crate::fs::ResourceFs;
use crate::manifest::Manifest;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_COMMENT: &str = "generated by lavender-plugin";

/// Receives the finished manifest; the last step of a run
pub trait ManifestWriter: Send + Sync {
    fn write(&self, manifest: &Manifest) -> Result<(), LavenderError>;
}

/// Writes the manifest as a properties file through a filesystem context
pub struct PropertiesWriter {
    fs: Arc<dyn ResourceFs>,
    destination: PathBuf,
    comment: String,
}

impl PropertiesWriter {
    pub fn new(fs: Arc<dyn ResourceFs>, destination: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            destination: destination.into(),
            comment: DEFAULT_COMMENT.to_string(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

impl ManifestWriter for PropertiesWriter {
    fn write(&self, manifest: &Manifest) -> Result<(), LavenderError> {
        let text = render(manifest, Some(&self.comment));
        self.fs
            .write(&self.destination, text.as_bytes())
            .map_err(|e| LavenderError::io(Stage::Writing, &self.destination, e))?;
        info!(
            destination = %self.destination.display(),
            entries = manifest.len(),
            "generated {}",
            self.destination.display()
        );
        Ok(())
    }
}

/// Render a manifest in properties format.
pub fn render(manifest: &Manifest, comment: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(comment) = comment {
        for line in comment.lines() {
            out.push('#');
            out.push_str(line);
            out.push('\n');
        }
    }
    for (key, value) in manifest.entries() {
        out.push_str(&escape(&key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}

/// Escape a key (`is_key`) or value for properties output.
///
/// Spaces are escaped everywhere in keys and only in leading position in
/// values. Characters outside printable ASCII become `\uXXXX` escapes of
/// their UTF-16 code units.
pub fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{0c}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04X}", unit);
                }
            }
        }
    }
    out
}
