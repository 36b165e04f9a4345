//! Markdown filename filter.

use std::ffi::OsStr;

/// Extension marker a directory entry must end with to be processed.
pub const MARKDOWN_SUFFIX: &str = ".md";

/// Returns true iff `name` ends with the literal suffix `.md`.
///
/// Case-sensitive exact suffix match: `README.MD`, `notes.mdx` and
/// `post.md.bak` are rejected.
pub fn is_markdown(name: &str) -> bool {
    name.ends_with(MARKDOWN_SUFFIX)
}

/// Same as [`is_markdown`] for raw directory entry names.
pub fn is_markdown_os(name: &OsStr) -> bool {
    // Lossy conversion only touches invalid byte sequences, never a trailing ".md".
    is_markdown(&name.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_md_suffix() {
        assert!(is_markdown("post.md"));
        assert!(is_markdown("2021-05-01-my-post.md"));
        assert!(is_markdown(".md"));
        assert!(is_markdown("archive.tar.md"));
    }

    #[test]
    fn rejects_other_names() {
        assert!(!is_markdown("notes.txt"));
        assert!(!is_markdown("README.MD"));
        assert!(!is_markdown("README.Md"));
        assert!(!is_markdown("page.mdx"));
        assert!(!is_markdown("post.md.bak"));
        assert!(!is_markdown("md"));
        assert!(!is_markdown(""));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        assert!(is_markdown_os(OsStr::from_bytes(b"caf\xe9.md")));
        assert!(!is_markdown_os(OsStr::from_bytes(b"caf\xe9.txt")));
        assert!(!is_markdown_os(OsStr::from_bytes(b"post.m\xe9")));
    }
}
