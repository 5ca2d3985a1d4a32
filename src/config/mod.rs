use crate::app_error::AppError;
use crate::cli::{CliArgs, Model};
use std::path::{Path, PathBuf};


pub const DEFAULT_LINTER: &str = "flake8";
pub const LINTER_OVERRIDE_VAR: &str = "CODE_REVIEW_FLAKE8";
pub const DEFAULT_LOG_ROOT: &str = ".code-review/logs";

#[derive(Debug)]
pub struct Config {
    pub model: Model,
    pub api_key: String,
    pub linter_program: String,
    pub log_root: PathBuf,
}

impl Config {
    pub fn from_lookup<F>(args: &CliArgs, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_var = args.model.api_key_var();
        let api_key = lookup(key_var)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::Config(format!("{key_var} not set in environment.")))?;

        let linter_program = lookup(LINTER_OVERRIDE_VAR)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_LINTER.to_string());

        let log_root = args
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_ROOT));

        Ok(Self {
            model: args.model,
            api_key,
            linter_program,
            log_root,
        })
    }
}

/// Loads the nearest `.env` file found in `start` or one of its ancestors
/// and returns its path. Variables already set in the environment win.
pub fn load_dotenv_upward(start: &Path) -> Result<Option<PathBuf>, AppError> {
    let Some(path) = start
        .ancestors()
        .map(|dir| dir.join(".env"))
        .find(|candidate| candidate.is_file())
    else {
        return Ok(None);
    };
    dotenv::from_path(&path).map_err(|e| {
        AppError::Config(format!("Failed to load '{}': {}", path.display(), e))
    })?;
    Ok(Some(path))
}
