//! Image-link rewriting.
//!
//! Finds the trigger pattern `](` … `images/image` and replaces it with an
//! absolute URL under the hosted image folder for a post:
//!
//! ```text
//! ![alt](./images/image1.png)
//!   -> ![alt](https://gnoy-nus.github.io/img/in-post/<folder>/images/image1.png)
//! ```
//!
//! Matching is purely textual (no Markdown parsing): greedy, global,
//! non-overlapping, left to right, and `.` does not cross line breaks. Two
//! image links on the same line therefore collapse into one match spanning
//! from the first `](` to the last `images/image`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Host and path prefix used when no other base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://gnoy-nus.github.io/img/in-post";

/// Literal tail shared by the trigger pattern and the replacement.
pub const IMAGE_STEM: &str = "images/image";

static TRIGGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\(.*images/image").unwrap());

/// Rewrites relative image links to absolute URLs under `base_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLinkRewriter {
    base_url: String,
}

impl Default for ImageLinkRewriter {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ImageLinkRewriter {
    /// Trailing slashes on `base_url` are dropped so the folder is joined with exactly one.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Text substituted for every match. `folder` is inserted verbatim.
    pub fn replacement(&self, folder: &str) -> String {
        format!("]({}/{}/{}", self.base_url, folder, IMAGE_STEM)
    }

    /// Number of trigger matches in `text`.
    pub fn count_matches(&self, text: &str) -> usize {
        TRIGGER_RE.find_iter(text).count()
    }

    /// Replace every match in `text`. Borrows `text` unchanged when nothing matches.
    ///
    /// The folder is never interpreted as replacement syntax: `$1` or `${x}`
    /// in a folder name end up literally in the URL.
    pub fn rewrite<'t>(&self, text: &'t str, folder: &str) -> Cow<'t, str> {
        let replacement = self.replacement(folder);
        TRIGGER_RE.replace_all(text, NoExpand(replacement.as_str()))
    }
}
