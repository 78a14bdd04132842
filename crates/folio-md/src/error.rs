//! Errors raised while reading a content file.
//!
//! Conversion itself cannot fail: undecodable bytes are replaced and a
//! front-matter block that does not parse is ignored, so the only failure
//! left is getting at the file.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur when processing a content file.
#[derive(Debug, thiserror::Error)]
pub enum MarkdownError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MarkdownError {
    /// Source file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } => path,
        }
    }

    /// Kind of the underlying I/O error.
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            Self::Read { source, .. } => source.kind(),
        }
    }

    /// Whether the source file is missing or not accessible to us.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self.io_kind(),
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
        )
    }
}
