use thiserror::Error;


#[derive(Error, Debug)]
pub enum AppError {
    #[error("Usage Error: {0}")]
    Usage(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Linter Unavailable: {0}")]
    ToolUnavailable(String),

    #[error("Parse Error: {0}")]
    Parse(String),

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP Request Error: {0}")]
    Network(String),

    #[error("JSON Serialization/Deserialization Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("LLM Response Parsing Error: {0}")]
    ResponseParsing(String),

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: &'static str,
        source: Box<AppError>,
    },
}

impl AppError {
    /// Wraps an error with the name of the review stage that produced it.
    pub fn in_stage(self, stage: &'static str) -> Self {
        AppError::Stage {
            stage,
            source: Box::new(self),
        }
    }
}
