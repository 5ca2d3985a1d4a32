use crate::app_error::AppError;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// One diagnostic per line, `row:col: code message`.
pub const FLAKE8_FORMAT_ARG: &str = "--format=%(row)d:%(col)d: %(code)s %(text)s";

/// Static analysis collaborator. Diagnostics are opaque lines in tool order.
pub trait Linter {
    fn name(&self) -> &str;

    fn lint_file(&self, path: &Path) -> Result<Vec<String>, AppError>;

    /// Lints source text by way of a temporary `.py` file, removed on return.
    fn lint_source(&self, source: &str) -> Result<Vec<String>, AppError> {
        let mut file = tempfile::Builder::new()
            .prefix("_tmp_review")
            .suffix(".py")
            .tempfile()?;
        file.write_all(source.as_bytes())?;
        file.flush()?;
        self.lint_file(file.path())
    }
}

pub struct Flake8Linter {
    program: String,
}

impl Flake8Linter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Linter for Flake8Linter {
    fn name(&self) -> &str {
        &self.program
    }

    fn lint_file(&self, path: &Path) -> Result<Vec<String>, AppError> {
        // flake8 exits 1 whenever it reports something, so the status is ignored.
        let output = Command::new(&self.program)
            .arg(path)
            .arg(FLAKE8_FORMAT_ARG)
            .output()
            .map_err(|e| {
                AppError::ToolUnavailable(format!(
                    "{} not installed or not in PATH: {e}",
                    self.program
                ))
            })?;

        Ok(split_diagnostics(&String::from_utf8_lossy(&output.stdout)))
    }
}

pub(crate) fn split_diagnostics(stdout: &str) -> Vec<String> {
    stdout.trim().lines().map(str::to_string).collect()
}
