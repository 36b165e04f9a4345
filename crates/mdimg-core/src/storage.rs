//! File lifecycle for a single rewrite.
//!
//! Reads the whole file, applies the rewriter, and when anything changed
//! writes the result to a sibling `.part` file which is synced and then
//! atomically renamed over the original. A crash leaves either the old or the
//! new content on disk, never a partial write.

use std::fs::{self, File, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::RewriteError;
use crate::rewrite::ImageLinkRewriter;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Result of rewriting one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOutcome {
    /// Number of trigger matches replaced.
    pub replacements: usize,
    /// False when nothing matched and the file was left untouched.
    pub changed: bool,
}

/// Path for the temp file: appends `.part` to the final path (e.g. `post.md` → `post.md.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Read the full contents of `path` as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String, RewriteError> {
    let bytes = fs::read(path).map_err(|source| RewriteError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| RewriteError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the contents of `path` with `contents` via temp file + rename.
///
/// The temp file gets `permissions` before it is renamed into place. On any
/// failure the temp file is removed and the original is left as it was.
pub fn write_atomic(
    path: &Path,
    contents: &str,
    permissions: Option<Permissions>,
) -> Result<(), RewriteError> {
    let tp = temp_path(path);

    if let Err(source) = write_temp(&tp, contents, permissions) {
        let _ = fs::remove_file(&tp);
        return Err(RewriteError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    fs::rename(&tp, path).map_err(|source| {
        let _ = fs::remove_file(&tp);
        RewriteError::Persist {
            path: path.to_path_buf(),
            temp_path: tp.clone(),
            source,
        }
    })
}

fn write_temp(tp: &Path, contents: &str, permissions: Option<Permissions>) -> io::Result<()> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(tp)?;
    file.write_all(contents.as_bytes())?;
    if let Some(perms) = permissions {
        file.set_permissions(perms)?;
    }
    file.sync_all()
}

/// Path whose contents should be replaced: `path` itself, or the file a
/// symlink at `path` points to. Renaming over the link would swap it for a
/// regular file and leave its target as it was.
pub fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    if fs::symlink_metadata(path)?.file_type().is_symlink() {
        fs::canonicalize(path)
    } else {
        Ok(path.to_path_buf())
    }
}

/// Rewrite the image links of one Markdown file in place.
///
/// Fails like a read+write open would: unreadable, missing, directory, or
/// unwritable paths are errors, as is content that is not valid UTF-8.
/// Writability is checked by opening the file, not by its mode bits, so a
/// process that may write a read-only file anyway (e.g. root) rewrites it.
/// Symlinks are followed and their target is rewritten.
pub fn rewrite_file(
    path: &Path,
    folder: &str,
    rewriter: &ImageLinkRewriter,
) -> Result<FileOutcome, RewriteError> {
    let text = read_text(path)?;

    let target = resolve_target(path).map_err(|source| RewriteError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    File::options()
        .read(true)
        .write(true)
        .open(&target)
        .map_err(|source| RewriteError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    let metadata = fs::metadata(&target).map_err(|source| RewriteError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let replacements = rewriter.count_matches(&text);
    if replacements == 0 {
        return Ok(FileOutcome {
            replacements,
            changed: false,
        });
    }

    let new_text = rewriter.rewrite(&text, folder);
    let changed = new_text != text;
    if changed {
        write_atomic(&target, &new_text, Some(metadata.permissions()))?;
    }
    tracing::debug!(
        path = %path.display(),
        replacements,
        changed,
        "rewrote image links"
    );

    Ok(FileOutcome {
        replacements,
        changed,
    })
}
