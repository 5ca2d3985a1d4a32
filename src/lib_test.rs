use crate::app_error::AppError;
use crate::cli::{CliArgs, Model, ReviewMode};
use crate::run_with_lookup;
use std::fs;
use tempfile::TempDir;

fn args_for(dir: &TempDir, file: &str, mode: ReviewMode) -> CliArgs {
    CliArgs {
        source: dir.path().join(file),
        mode,
        model: Model::Gemini1_5Pro,
        log_dir: Some(dir.path().join("logs")),
    }
}

#[tokio::test]
async fn test_missing_credential_stops_before_any_work() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("foo.py"), "def compute():\n    pass\n").unwrap();
    let args = args_for(&dir, "foo.py", ReviewMode::MultiAgent);

    let result = run_with_lookup(&args, |_| None).await;

    match result {
        Err(AppError::Config(msg)) => assert!(msg.contains("GOOGLE_API_KEY")),
        other => panic!("expected config error, got {other:?}"),
    }
    // No log directory and no report: nothing past the credential check ran.
    assert!(!dir.path().join("logs").exists());
    assert!(!dir.path().join("fooMultiAgent_review.md").exists());
}

#[tokio::test]
async fn test_missing_source_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let args = args_for(&dir, "absent.py", ReviewMode::Single);

    let result = run_with_lookup(&args, |_| Some("key".to_string())).await;

    match result {
        Err(AppError::Usage(msg)) => assert!(msg.starts_with("File not found:")),
        other => panic!("expected usage error, got {other:?}"),
    }
    assert!(!dir.path().join("logs").exists());
}

#[tokio::test]
async fn test_unavailable_linter_fails_and_logs_the_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("foo.py"), "def compute():\n    pass\n").unwrap();
    let args = args_for(&dir, "foo.py", ReviewMode::Single);

    let result = run_with_lookup(&args, |name| match name {
        "GOOGLE_API_KEY" => Some("key".to_string()),
        "CODE_REVIEW_FLAKE8" => Some("code-review-no-such-linter-binary".to_string()),
        _ => None,
    })
    .await;

    assert!(matches!(result, Err(AppError::ToolUnavailable(_))));
    assert!(!dir.path().join("foo_review.md").exists());

    let run_dir = fs::read_dir(dir.path().join("logs"))
        .unwrap()
        .flatten()
        .next()
        .expect("run log directory")
        .path();
    let final_error = fs::read_to_string(run_dir.join("final_error.txt")).unwrap();
    assert!(final_error.starts_with("Linter Unavailable:"));
}
