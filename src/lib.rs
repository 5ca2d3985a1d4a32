//! code-review: flake8 findings plus an LLM review for one Python file.

pub mod app_error;
pub mod cli;
pub mod config;
pub mod functions;
pub mod lint;
pub mod llm;
pub mod logger;
pub mod review;

#[cfg(test)]
mod lib_test;

use app_error::AppError;
use cli::CliArgs;
use config::Config;
use lint::Flake8Linter;
use llm::LlmCompletionService;
use logger::Logger;
use std::path::{Path, PathBuf};

/// Runs one review end to end and returns the path of the written report.
pub async fn run(args: &CliArgs) -> Result<PathBuf, AppError> {
    ensure_source_exists(&args.source)?;
    config::load_dotenv_upward(&std::env::current_dir()?)?;
    run_with_lookup(args, |name| std::env::var(name).ok()).await
}

/// Like [`run`], with the environment supplied by `lookup`.
///
/// The credential is checked before the linter, the log directory or the
/// model API are touched.
pub async fn run_with_lookup<F>(args: &CliArgs, lookup: F) -> Result<PathBuf, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    ensure_source_exists(&args.source)?;
    let config = Config::from_lookup(args, lookup)?;

    let logger = Logger::new(&config.log_root, args.mode.log_suffix())?;
    println!("Run log directory: {}", logger.log_dir().display());

    let linter = Flake8Linter::new(config.linter_program);
    let service = LlmCompletionService::new(config.model, config.api_key, logger);

    let result = review::run_review(&args.source, args.mode, &linter, &service).await;
    if let Err(e) = &result {
        let _ = service.logger().log_text("final_error.txt", &e.to_string());
    }
    result
}

fn ensure_source_exists(path: &Path) -> Result<(), AppError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(AppError::Usage(format!("File not found: {}", path.display())))
    }
}
