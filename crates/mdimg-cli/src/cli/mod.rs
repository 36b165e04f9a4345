//! CLI for mdimg.

mod prompt;

use anyhow::{bail, Result};
use clap::Parser;
use mdimg_core::config;
use mdimg_core::{run, RunOptions, RunSummary};
use std::io::{self, Write};
use std::path::PathBuf;

pub use prompt::read_folder;

/// Rewrite relative image links in the Markdown files of a directory.
#[derive(Debug, Parser)]
#[command(name = "mdimg")]
#[command(
    about = "mdimg: point relative Markdown image links at the hosted image folder of a post",
    long_about = None
)]
pub struct Cli {
    /// Post folder under the image host, e.g. 2021-05-01-my-post. Prompted for when omitted.
    pub folder: Option<String>,

    /// Directory whose Markdown files are rewritten (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Stop at the first file that cannot be rewritten instead of skipping it.
    #[arg(long)]
    pub fail_fast: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let folder = match cli.folder {
            Some(folder) => folder,
            None => read_folder(&mut io::stdin().lock(), &mut io::stdout())?,
        };
        let dir = match cli.dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let opts = RunOptions {
            dir,
            folder,
            fail_fast: cli.fail_fast || cfg.fail_fast.unwrap_or(false),
        };

        let summary = run(&opts, &cfg.rewriter(), |path| println!("{}", path.display()))?;
        write_summary(&summary, &mut io::stdout(), &mut io::stderr())?;
        ensure_success(&summary)
    }
}

/// Print one `skipped:` line per failure to `err`, then the totals to `out`.
pub fn write_summary<O: Write, E: Write>(
    summary: &RunSummary,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    for failure in summary.failures() {
        let kind = if failure.is_io() { "io" } else { "encoding" };
        writeln!(err, "skipped ({kind}): {failure}")?;
    }
    writeln!(
        out,
        "rewrote {}, unchanged {}, failed {} ({} link(s) replaced)",
        summary.rewritten(),
        summary.unchanged(),
        summary.failed(),
        summary.replacements()
    )
}

/// Turn a summary with failures into the error that makes `mdimg` exit 1.
pub fn ensure_success(summary: &RunSummary) -> Result<()> {
    if summary.has_failures() {
        bail!("{} file(s) could not be rewritten", summary.failed());
    }
    Ok(())
}
