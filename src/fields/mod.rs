//! Field resolution.
//!
//! Page references in a freshly written package show a placeholder. A
//! [`FieldResolver`] opens the package in a layout engine, updates every
//! field and writes the result. Resolvers are often single-instance office
//! processes that refuse work while busy, so calls go through
//! [`resolve_with_retry`].

use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};

/// Updates fields (page numbers, TOC) in a document package.
pub trait FieldResolver: Send + Sync {
    /// Read `input`, update all fields, write the result to `output`.
    fn resolve(&self, input: &Path, output: &Path) -> Result<()>;

    /// Human-readable resolver name for logs.
    fn name(&self) -> &str {
        "field resolver"
    }
}

/// Bounded retry with a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, at least one
    pub max_attempts: u32,

    /// Pause between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of attempts (minimum 1).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the delay between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(1),
        }
    }
}

/// Run `resolver` until it succeeds or the policy is exhausted.
///
/// Returns `output` on success. On exhaustion the last error is reported in
/// [`Error::FieldUpdate`]; `input` is left untouched and stays usable.
pub fn resolve_with_retry(
    resolver: &dyn FieldResolver,
    policy: &RetryPolicy,
    input: &Path,
    output: &Path,
) -> Result<PathBuf> {
    let attempts = policy.max_attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match resolver.resolve(input, output) {
            Ok(()) => {
                log::debug!(
                    "{} updated fields on attempt {}",
                    resolver.name(),
                    attempt
                );
                return Ok(output.to_path_buf());
            }
            Err(e) => {
                log::warn!(
                    "{} attempt {}/{} failed: {}",
                    resolver.name(),
                    attempt,
                    attempts,
                    e
                );
                last_error = e.to_string();
                if attempt < attempts && !policy.delay.is_zero() {
                    thread::sleep(policy.delay);
                }
            }
        }
    }

    Err(Error::FieldUpdate {
        attempts,
        message: last_error,
    })
}

/// Runs an external program to update fields.
///
/// Arguments may contain `{input}`, `{output}` and `{outdir}` (the
/// output's parent directory); they are substituted per call.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandResolver {
    /// Create a resolver running `program` with `args`.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// LibreOffice in headless mode, converting the package in place into
    /// the output directory. LibreOffice names the file after the input, so
    /// `output` should share the input's file name.
    pub fn libreoffice(program: impl Into<PathBuf>) -> Self {
        Self::new(
            program,
            vec![
                "--headless".to_string(),
                "--convert-to".to_string(),
                "docx:MS Word 2007 XML".to_string(),
                "--outdir".to_string(),
                "{outdir}".to_string(),
                "{input}".to_string(),
            ],
        )
    }

    /// Arguments for one call, placeholders substituted.
    pub fn command_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let outdir = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{input}", &input.to_string_lossy())
                    .replace("{output}", &output.to_string_lossy())
                    .replace("{outdir}", &outdir.to_string_lossy())
            })
            .collect()
    }
}

impl FieldResolver for CommandResolver {
    fn resolve(&self, input: &Path, output: &Path) -> Result<()> {
        let args = self.command_args(input, output);
        // A leftover file would pass for this run's result.
        if output.exists() && output != input {
            std::fs::remove_file(output)?;
        }
        log::debug!("Running {} {:?}", self.program.display(), args);

        let result = Command::new(&self.program).args(&args).output()?;
        if !result.status.success() {
            return Err(Error::Other(format!(
                "{} exited with {}: {}",
                self.program.display(),
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }
        if !output.exists() {
            return Err(Error::Other(format!(
                "{} did not produce {}",
                self.program.display(),
                output.display()
            )));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "command resolver"
    }
}
