use crate::app_error::AppError;
use std::path::PathBuf;

pub const USAGE: &str =
    "Usage: code-review [--multi-agent] [--model <gemini-1.5-pro|gemini-2.5-pro|gpt-5>] [--log-dir <dir>] path/to/file.py";

/// The single stderr line printed when argument parsing fails.
pub fn usage_error_line(error: &AppError) -> String {
    format!("{}. {USAGE}", error.to_string().trim_end_matches('.'))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    #[default]
    Gemini1_5Pro,
    Gemini2_5Pro,
    Gpt5,
}

impl Model {
    fn from_str(s: &str) -> Result<Self, AppError> {
        match s {
            "gemini-1.5-pro" => Ok(Model::Gemini1_5Pro),
            "gemini-2.5-pro" => Ok(Model::Gemini2_5Pro),
            "gpt-5" => Ok(Model::Gpt5),
            _ => Err(AppError::Usage(format!("Unsupported model: {s}"))),
        }
    }

    /// Environment variable holding the credential for this model's provider.
    pub fn api_key_var(self) -> &'static str {
        match self {
            Model::Gemini1_5Pro | Model::Gemini2_5Pro => "GOOGLE_API_KEY",
            Model::Gpt5 => "OPENAI_API_KEY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewMode {
    #[default]
    Single,
    MultiAgent,
}

impl ReviewMode {
    pub fn log_suffix(self) -> &'static str {
        match self {
            ReviewMode::Single => "review",
            ReviewMode::MultiAgent => "multi-agent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Review(CliArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub source: PathBuf,
    pub mode: ReviewMode,
    pub model: Model,
    pub log_dir: Option<PathBuf>,
}

pub fn parse_cli_args() -> Result<Command, AppError> {
    parse_args(std::env::args().skip(1))
}

pub fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, AppError> {
    let mut mode: Option<ReviewMode> = None;
    let mut model = Model::default();
    let mut log_dir = None;
    let mut positional: Vec<PathBuf> = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--multi-agent" | "--multi" => {
                if mode.is_some() {
                    return Err(AppError::Usage(
                        "The review mode was given more than once.".to_string(),
                    ));
                }
                mode = Some(ReviewMode::MultiAgent);
            }
            "--model" => {
                let model_str = args.next().ok_or_else(|| {
                    AppError::Usage("Missing value for --model argument".to_string())
                })?;
                model = Model::from_str(&model_str)?;
            }
            "--log-dir" => {
                let dir = args.next().ok_or_else(|| {
                    AppError::Usage("Missing value for --log-dir argument".to_string())
                })?;
                log_dir = Some(PathBuf::from(dir));
            }
            other if other.starts_with("--") => {
                return Err(AppError::Usage(format!("Unknown argument: {arg}")));
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    if positional.len() != 1 {
        return Err(AppError::Usage(format!(
            "expected exactly one source file, got {}",
            positional.len()
        )));
    }

    Ok(Command::Review(CliArgs {
        source: positional.remove(0),
        mode: mode.unwrap_or_default(),
        model,
        log_dir,
    }))
}
