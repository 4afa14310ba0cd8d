//! Mapping of request targets onto paths under the served root.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::http::decode::{DecodeError, url_decode};

/// Appended to any target that names a directory.
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// Why a request target was refused. Every variant is answered with 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("malformed percent-encoding: {0}")]
    Decode(#[from] DecodeError),
    #[error("path is not absolute")]
    NotAbsolute,
    #[error("path contains '..'")]
    Traversal,
    #[error("path contains a byte that cannot appear in a file name")]
    InvalidByte,
}

/// The directory files are served from.
///
/// A single trailing `/` is removed when the root is created, so composing
/// it with a decoded target (which always starts with `/`) never doubles the
/// separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedRoot {
    root: OsString,
}

impl ServedRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let mut root = path_to_bytes(&root.into());
        if root.last() == Some(&b'/') {
            root.pop();
        }
        Self {
            root: bytes_to_os_string(root).unwrap_or_default(),
        }
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.root)
    }

    /// Turns a raw request target (query already removed) into a file path.
    ///
    /// The target is percent-decoded, must start with `/` and must not
    /// contain `..` anywhere, not even inside a file name. A target ending
    /// in `/` gets [`DEFAULT_DOCUMENT`] appended. No normalisation happens
    /// beyond that: the result is the root followed by the decoded path.
    pub fn resolve(&self, target: &str) -> Result<PathBuf, ResolveError> {
        let mut decoded = url_decode(target)?;

        if decoded.first() != Some(&b'/') {
            return Err(ResolveError::NotAbsolute);
        }
        if decoded.windows(2).any(|w| w == b"..") {
            return Err(ResolveError::Traversal);
        }
        if decoded.contains(&0) {
            return Err(ResolveError::InvalidByte);
        }

        if decoded.last() == Some(&b'/') {
            decoded.extend_from_slice(DEFAULT_DOCUMENT.as_bytes());
        }

        let mut full = path_to_bytes(self.as_path());
        full.extend_from_slice(&decoded);

        bytes_to_os_string(full)
            .map(PathBuf::from)
            .ok_or(ResolveError::InvalidByte)
    }
}

#[cfg(unix)]
fn path_to_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(unix)]
fn bytes_to_os_string(bytes: Vec<u8>) -> Option<OsString> {
    use std::os::unix::ffi::OsStringExt;
    Some(OsString::from_vec(bytes))
}

#[cfg(not(unix))]
fn path_to_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

// Outside Unix a path has to be valid UTF-8 to be built from bytes.
#[cfg(not(unix))]
fn bytes_to_os_string(bytes: Vec<u8>) -> Option<OsString> {
    String::from_utf8(bytes).ok().map(OsString::from)
}
