//! Directory scan and per-file rewrite loop.
//!
//! The working directory and folder parameter are passed in through
//! [`RunOptions`]; nothing here reads the process cwd or stdin.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RewriteError;
use crate::filter::is_markdown_os;
use crate::rewrite::ImageLinkRewriter;
use crate::storage::{self, FileOutcome};

/// Inputs for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory whose immediate entries are scanned.
    pub dir: PathBuf,
    /// Post folder interpolated into every replacement URL.
    pub folder: String,
    /// Abort on the first failing file instead of recording it and moving on.
    pub fail_fast: bool,
}

/// Outcome for one Markdown file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<FileOutcome, RewriteError>,
}

/// Per-file results of a run, in processing order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
}

impl RunSummary {
    /// Files whose content was replaced.
    pub fn rewritten(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.result, Ok(FileOutcome { changed: true, .. })))
            .count()
    }

    /// Files processed successfully but left as they were.
    pub fn unchanged(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.result, Ok(FileOutcome { changed: false, .. })))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RewriteError> {
        self.reports.iter().filter_map(|r| r.result.as_ref().err())
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Total links replaced across all successful files.
    pub fn replacements(&self) -> usize {
        self.reports
            .iter()
            .filter_map(|r| r.result.as_ref().ok())
            .map(|o| o.replacements)
            .sum()
    }
}

/// Markdown entries of `dir` (non-recursive), sorted by file name.
///
/// Only the name is checked: a directory called `notes.md` is listed too and
/// fails later when it is read.
pub fn list_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("list {}", dir.display()))?;
        let name = entry.file_name();
        if is_markdown_os(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names.into_iter().map(|n| dir.join(n)).collect())
}

/// Rewrite every Markdown file in `opts.dir`.
///
/// `on_file` is called with each path before it is processed. Per-file
/// failures are collected in the summary unless `opts.fail_fast` is set, in
/// which case the first one is returned as the error and later files are not
/// touched. Failing to list the directory is always an error.
pub fn run<F>(
    opts: &RunOptions,
    rewriter: &ImageLinkRewriter,
    mut on_file: F,
) -> Result<RunSummary>
where
    F: FnMut(&Path),
{
    let files = list_markdown_files(&opts.dir)?;
    tracing::debug!(dir = %opts.dir.display(), files = ?files, "markdown files");
    tracing::info!(
        dir = %opts.dir.display(),
        folder = %opts.folder,
        count = files.len(),
        "rewriting image links"
    );

    let mut summary = RunSummary::default();
    for path in files {
        on_file(&path);
        let result = storage::rewrite_file(&path, &opts.folder, rewriter);
        if let Err(err) = &result {
            tracing::warn!(path = %path.display(), error = %err, "rewrite failed");
        }
        match result {
            Err(err) if opts.fail_fast => return Err(err.into()),
            result => summary.reports.push(FileReport { path, result }),
        }
    }

    tracing::info!(
        rewritten = summary.rewritten(),
        unchanged = summary.unchanged(),
        failed = summary.failed(),
        "run finished"
    );
    Ok(summary)
}
