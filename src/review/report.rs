use crate::app_error::AppError;
use crate::cli::ReviewMode;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SINGLE_REPORT_SUFFIX: &str = "_review.md";
pub const MULTI_AGENT_REPORT_SUFFIX: &str = "MultiAgent_review.md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

impl Section {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }
}

/// `dir/foo.py` becomes `dir/foo_review.md` or `dir/fooMultiAgent_review.md`.
pub fn report_path(input: &Path, mode: ReviewMode) -> PathBuf {
    let suffix = match mode {
        ReviewMode::Single => SINGLE_REPORT_SUFFIX,
        ReviewMode::MultiAgent => MULTI_AGENT_REPORT_SUFFIX,
    };
    let mut name: OsString = input.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    input.with_file_name(name)
}

/// Renders `# heading` / body blocks separated by a blank line.
pub fn render_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|s| format!("# {}\n{}", s.heading, s.body))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Writes the report through a temporary sibling file so that the
/// destination either holds the complete report or is left untouched.
pub fn write_report(path: &Path, content: &str) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::Builder::new()
        .prefix(".code-review-")
        .suffix(".md.tmp")
        .tempfile_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    file.persist(path).map_err(|e| AppError::Io(e.error))?;
    Ok(())
}
