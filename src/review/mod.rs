pub mod prompt_builder;
pub mod prompts;
pub mod report;

#[cfg(test)]
mod report_test;

use crate::app_error::AppError;
use crate::cli::ReviewMode;
use crate::functions::extract_functions;
use crate::lint::Linter;
use crate::llm::TextCompletionService;
use prompt_builder::{build_prompt, ReviewInput, Stage};
use report::{render_sections, report_path, write_report, Section};
use std::fs;
use std::path::{Path, PathBuf};

pub const MULTI_AGENT_STAGES: [Stage; 3] = [Stage::Refactor, Stage::TestStubs, Stage::Documentation];

pub const FUNCTIONS_HEADING: &str = "Functions";
pub const ISSUES_HEADING: &str = "Issues";

/// Reviews one Python file and writes the markdown report next to it.
///
/// Nothing is written unless every stage succeeds. Returns the report path.
pub async fn run_review(
    source_path: &Path,
    mode: ReviewMode,
    linter: &dyn Linter,
    service: &dyn TextCompletionService,
) -> Result<PathBuf, AppError> {
    let source = fs::read_to_string(source_path)?;

    println!("Extracting functions from {}...", source_path.display());
    let functions = extract_functions(&source)?;

    println!("Running {}...", linter.name());
    let issues = match mode {
        ReviewMode::Single => linter.lint_file(source_path)?,
        ReviewMode::MultiAgent => linter.lint_source(&source)?,
    };
    println!(
        "Found {} function(s) and {} lint issue(s).",
        functions.len(),
        issues.len()
    );

    let input = ReviewInput {
        source,
        issues,
        functions,
    };

    println!("Querying {}...", service.model_name());
    let content = match mode {
        ReviewMode::Single => run_stage(Stage::Review, 1, &input, service).await?,
        ReviewMode::MultiAgent => run_multi_agent(&input, service).await?,
    };

    let path = report_path(source_path, mode);
    write_report(&path, &content)?;
    Ok(path)
}

async fn run_multi_agent(
    input: &ReviewInput,
    service: &dyn TextCompletionService,
) -> Result<String, AppError> {
    let mut sections = vec![
        Section::new(FUNCTIONS_HEADING, input.functions_text()),
        Section::new(ISSUES_HEADING, input.issues_text()),
    ];

    for (i, stage) in MULTI_AGENT_STAGES.iter().enumerate() {
        println!(
            "Stage {}/{}: {}...",
            i + 1,
            MULTI_AGENT_STAGES.len(),
            stage.label()
        );
        let completion = run_stage(*stage, i + 1, input, service).await?;
        sections.push(Section::new(stage.heading(), completion.trim()));
    }

    Ok(render_sections(&sections))
}

async fn run_stage(
    stage: Stage,
    number: usize,
    input: &ReviewInput,
    service: &dyn TextCompletionService,
) -> Result<String, AppError> {
    let prompt = build_prompt(stage, input);
    let log_prefix = format!("{number}-{}", stage.slug());
    service
        .complete(&log_prefix, &prompt)
        .await
        .map_err(|e| e.in_stage(stage.label()))
}
