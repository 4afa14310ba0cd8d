//! Serving files from the served root.
//!
//! [`resolve`] turns a request target into a path that stays under the root;
//! [`StaticFiles`] reads that path and classifies the result as an
//! [`Outcome`].

pub mod resolve;

use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::http::outcome::Outcome;

pub use resolve::{DEFAULT_DOCUMENT, ResolveError, ServedRoot};

/// Read-only file handler shared by every session.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: ServedRoot,
}

impl StaticFiles {
    pub fn new(root: ServedRoot) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &ServedRoot {
        &self.root
    }

    /// Resolves `target` and reads the whole file into memory.
    ///
    /// Any failure to open the file, including it being a directory, is a
    /// 404. Only a read error on a file that did open is an internal error.
    pub async fn serve(&self, target: &str) -> Outcome {
        let path = match self.root.resolve(target) {
            Ok(path) => path,
            Err(e) => {
                debug!(request_target = %target, error = %e, "Rejected request target");
                return Outcome::BadRequest;
            }
        };

        let mut file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "File not opened");
                return Outcome::NotFound;
            }
        };

        let len = match file.metadata().await {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(_) => {
                debug!(path = %path.display(), "Not a regular file");
                return Outcome::NotFound;
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "File metadata unavailable");
                return Outcome::NotFound;
            }
        };

        let mut content = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
        match file.read_to_end(&mut content).await {
            Ok(_) => Outcome::Success(content),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read file");
                Outcome::InternalError
            }
        }
    }
}
