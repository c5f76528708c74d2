//! CLI output: error mapping and scan result formatting.

use crate::error::LavenderError;
use crate::manifest::builder::ResourceIndex;
use crate::manifest::index_key;
use serde_json::{Map, Value};

/// Map a pipeline error to the line printed before exiting.
pub fn map_error(e: &LavenderError) -> String {
    format!("{} failed: {}", e.stage(), e)
}

/// One `index.<path>=<fingerprint>` line per resource.
pub fn format_scan_text(index: &ResourceIndex) -> String {
    index
        .iter()
        .map(|(path, fingerprint)| format!("{}={}", index_key(path), fingerprint))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed JSON object mapping relative path to fingerprint.
pub fn format_scan_json(index: &ResourceIndex) -> String {
    let object: Map<String, Value> = index
        .iter()
        .map(|(path, fingerprint)| (path.clone(), Value::from(fingerprint.as_str())))
        .collect();
    format!("{:#}", Value::Object(object))
}
