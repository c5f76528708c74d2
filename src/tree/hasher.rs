//! Content fingerprints using BLAKE3

use crate::error::{LavenderError, Stage};
use crate::fs::ResourceFs;
use blake3::Hasher;
use serde::Serialize;
use std::fmt;
use std::io::{self, Read};
use std::path::Path;

/// Length of a rendered fingerprint (32-byte digest as hex)
pub const FINGERPRINT_HEX_LEN: usize = 64;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Lowercase hex digest of a file's raw bytes
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    fn from_digest(digest: &blake3::Hash) -> Self {
        Self(hex::encode(digest.as_bytes()))
    }

    /// Wrap an already rendered digest. Returns `None` unless `hex` is
    /// non-empty, even-length, lowercase hex.
    #[cfg(test)]
    pub(crate) fn from_hex(hex: &str) -> Option<Self> {
        let valid = !hex.is_empty()
            && hex.len() % 2 == 0
            && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        valid.then(|| Self(hex.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint an in-memory byte slice
pub fn compute_content_hash(content: &[u8]) -> Fingerprint {
    let mut hasher = Hasher::new();
    hasher.update(content);
    Fingerprint::from_digest(&hasher.finalize())
}

/// Fingerprint a byte stream without buffering it whole
pub fn fingerprint_reader(reader: &mut dyn Read) -> io::Result<Fingerprint> {
    let mut hasher = Hasher::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..read]);
    }
    Ok(Fingerprint::from_digest(&hasher.finalize()))
}

/// Computes fingerprints of resource files through a filesystem context
pub struct ContentFingerprinter;

impl ContentFingerprinter {
    /// Read `path` fully and fingerprint its bytes.
    ///
    /// # Errors
    /// Any read failure is reported as an I/O error at the hashing stage.
    pub fn fingerprint(fs: &dyn ResourceFs, path: &Path) -> Result<Fingerprint, LavenderError> {
        let mut reader = fs
            .open(path)
            .map_err(|e| LavenderError::io(Stage::Hashing, path, e))?;
        fingerprint_reader(&mut reader).map_err(|e| LavenderError::io(Stage::Hashing, path, e))
    }
}
