//! Interactive folder prompt.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

pub const PROMPT: &str = "Enter the post folder that holds images/:";

/// Print the prompt and read one line as the folder parameter.
///
/// Only the line terminator is stripped; surrounding spaces are kept and an
/// empty line is accepted. End of input before any line is an error.
pub fn read_folder<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    writeln!(out, "{PROMPT}").context("write prompt")?;
    out.flush().context("write prompt")?;

    let mut line = String::new();
    let n = input.read_line(&mut line).context("read folder from stdin")?;
    if n == 0 {
        bail!("no folder given: stdin closed before a line was read");
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
