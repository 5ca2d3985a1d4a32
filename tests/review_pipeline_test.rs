use code_review::app_error::AppError;
use code_review::cli::ReviewMode;
use code_review::functions::extract_functions;
use code_review::lint::Linter;
use code_review::llm::TextCompletionService;
use code_review::review::run_review;
use std::cell::RefCell;
use std::fs;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use tempfile::TempDir;

const GREETER_MODULE: &str = r#"import math, os

def compute(x,y):
    return x* y+math.sqrt(x)

def normalize(data):
    result=[]
    for v in data:
        if v>0:
            result.append(v/ max(data))
    return result

class Greeter:
    def __init__(self,name):
        self.name=name
    def greet(self):
        return "Hello, "+self.name
"#;

struct ScriptedLinter(Vec<String>);

impl Linter for ScriptedLinter {
    fn name(&self) -> &str {
        "scripted"
    }

    fn lint_file(&self, _path: &Path) -> Result<Vec<String>, AppError> {
        Ok(self.0.clone())
    }
}

/// Answers each prompt with `<stage-prefix> answer`, optionally failing one call.
struct EchoService {
    fail_on_call: Option<usize>,
    calls: RefCell<usize>,
}

impl TextCompletionService for EchoService {
    fn model_name(&self) -> &str {
        "echo"
    }

    fn complete<'a>(
        &'a self,
        log_prefix: &'a str,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AppError>> + 'a>> {
        let call = {
            let mut calls = self.calls.borrow_mut();
            *calls += 1;
            *calls
        };
        let result = if self.fail_on_call == Some(call) {
            Err(AppError::Network("error sending request".to_string()))
        } else {
            Ok(format!("{log_prefix} answer"))
        };
        Box::pin(async move { result })
    }
}

#[test]
fn test_extracts_module_functions_before_methods() {
    assert_eq!(
        extract_functions(GREETER_MODULE).unwrap(),
        vec!["compute", "normalize", "__init__", "greet"]
    );
}

#[tokio::test]
async fn test_multi_agent_review_of_two_functions_without_issues() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("calc.py");
    fs::write(
        &source,
        "def compute(x, y):\n    return x * y\n\n\ndef normalize(data):\n    return data\n",
    )
    .unwrap();
    let service = EchoService {
        fail_on_call: None,
        calls: RefCell::new(0),
    };

    let report = run_review(
        &source,
        ReviewMode::MultiAgent,
        &ScriptedLinter(Vec::new()),
        &service,
    )
    .await
    .unwrap();

    assert_eq!(report, dir.path().join("calcMultiAgent_review.md"));
    let content = fs::read_to_string(report).unwrap();
    assert!(content.starts_with("# Functions\ncompute, normalize\n\n# Issues\n<no issues>\n\n"));
    assert!(content.contains("# Refactored Code\n1-refactor answer"));
    assert!(content.contains("# Test Stubs\n2-test-stubs answer"));
    assert!(content.ends_with("# Documentation\n3-documentation answer"));
}

#[tokio::test]
async fn test_transport_failure_on_second_stage_leaves_no_report() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("greeter.py");
    fs::write(&source, GREETER_MODULE).unwrap();
    let service = EchoService {
        fail_on_call: Some(2),
        calls: RefCell::new(0),
    };

    let result = run_review(
        &source,
        ReviewMode::MultiAgent,
        &ScriptedLinter(vec!["1:1: F401 'os' imported but unused".to_string()]),
        &service,
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "test stubs stage failed: HTTP Request Error: error sending request"
    );
    assert_eq!(*service.calls.borrow(), 2);
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
    assert_eq!(entries.len(), 1, "only the source file should remain");
}

#[tokio::test]
async fn test_single_stage_review_writes_completion_verbatim() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("greeter.py");
    fs::write(&source, GREETER_MODULE).unwrap();
    let service = EchoService {
        fail_on_call: None,
        calls: RefCell::new(0),
    };

    let report = run_review(
        &source,
        ReviewMode::Single,
        &ScriptedLinter(vec!["1:1: F401 'os' imported but unused".to_string()]),
        &service,
    )
    .await
    .unwrap();

    assert_eq!(report, dir.path().join("greeter_review.md"));
    assert_eq!(fs::read_to_string(report).unwrap(), "1-review answer");
}
