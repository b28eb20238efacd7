// greyform/src/core/overwrite.rs
use super::{Result, TransformError};
use clap::ValueEnum;
use serde::Deserialize;
use std::io::{BufRead, Stderr, StdinLock, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteDecision {
    Overwrite,
    Skip,
}

/// Decides what happens to an output path that already exists.
///
/// Consulted once per colliding path, never for paths that are free.
pub trait OverwriteOracle {
    fn decide(&mut self, path: &Path) -> Result<OverwriteDecision>;
}

impl<F> OverwriteOracle for F
where
    F: FnMut(&Path) -> OverwriteDecision,
{
    fn decide(&mut self, path: &Path) -> Result<OverwriteDecision> {
        Ok(self(path))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Ask on the terminal.
    #[default]
    Prompt,
    Overwrite,
    Skip,
    /// Abort the whole run.
    Fail,
}

impl OverwriteOracle for OverwritePolicy {
    fn decide(&mut self, path: &Path) -> Result<OverwriteDecision> {
        match self {
            OverwritePolicy::Prompt => Prompter::stdio().decide(path),
            OverwritePolicy::Overwrite => Ok(OverwriteDecision::Overwrite),
            OverwritePolicy::Skip => Ok(OverwriteDecision::Skip),
            OverwritePolicy::Fail => Err(TransformError::OutputExists(path.to_path_buf())),
        }
    }
}

/// Yes/no question on a line-oriented reader. Anything but `y`/`yes` declines.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> OverwriteOracle for Prompter<R, W> {
    fn decide(&mut self, path: &Path) -> Result<OverwriteDecision> {
        write!(
            self.output,
            "The file '{}' already exists. Overwrite it? [y/N] ",
            path.display()
        )?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            log::warn!("No answer on input, keeping {}", path.display());
            return Ok(OverwriteDecision::Skip);
        }

        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(OverwriteDecision::Overwrite),
            _ => Ok(OverwriteDecision::Skip),
        }
    }
}
