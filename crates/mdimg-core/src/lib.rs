pub mod config;
pub mod logging;

pub mod driver;
pub mod error;
pub mod filter;
pub mod rewrite;
pub mod storage;

pub use driver::{run, FileReport, RunOptions, RunSummary};
pub use error::RewriteError;
pub use rewrite::ImageLinkRewriter;
pub use storage::FileOutcome;
