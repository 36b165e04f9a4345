//! Per-file rewrite failures.

use std::io;
use std::path::PathBuf;

/// Why a single Markdown file could not be rewritten.
///
/// Kept typed (rather than `anyhow`) so the driver can record it in the run
/// summary and carry on with the next file.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// Missing file, permission denied, a directory, or removed after listing.
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// Creating, writing or syncing the temp file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Renaming the temp file over the original failed.
    #[error("failed to replace {} with {}: {source}", .path.display(), .temp_path.display())]
    Persist {
        path: PathBuf,
        temp_path: PathBuf,
        source: io::Error,
    },
}

impl RewriteError {
    /// The Markdown file the error is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            RewriteError::Read { path, .. }
            | RewriteError::Decode { path, .. }
            | RewriteError::Write { path, .. }
            | RewriteError::Persist { path, .. } => path,
        }
    }

    /// True for filesystem access failures as opposed to content problems.
    pub fn is_io(&self) -> bool {
        !matches!(self, RewriteError::Decode { .. })
    }
}
