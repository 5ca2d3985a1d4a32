use super::prompts::{
    DOCUMENTATION_CLOSING, DOCUMENTATION_INSTRUCTIONS, NO_FUNCTIONS_PLACEHOLDER,
    NO_ISSUES_PLACEHOLDER, REFACTOR_CLOSING, REFACTOR_INSTRUCTIONS, REVIEW_ANSWER_HEADING,
    REVIEW_INSTRUCTIONS, TEST_STUBS_CLOSING, TEST_STUBS_INSTRUCTIONS,
};

/// Everything a prompt is allowed to depend on. Built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewInput {
    pub source: String,
    pub issues: Vec<String>,
    pub functions: Vec<String>,
}

impl ReviewInput {
    /// Issues one per line, or the placeholder when flake8 found nothing.
    pub fn issues_text(&self) -> String {
        if self.issues.is_empty() {
            NO_ISSUES_PLACEHOLDER.to_string()
        } else {
            self.issues.join("\n")
        }
    }

    pub fn functions_text(&self) -> String {
        if self.functions.is_empty() {
            NO_FUNCTIONS_PLACEHOLDER.to_string()
        } else {
            self.functions.join(", ")
        }
    }

    fn issue_bullets(&self) -> String {
        if self.issues.is_empty() {
            return NO_ISSUES_PLACEHOLDER.to_string();
        }
        self.issues
            .iter()
            .map(|issue| format!("- {issue}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Review,
    Refactor,
    TestStubs,
    Documentation,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Review => "review",
            Stage::Refactor => "refactor",
            Stage::TestStubs => "test stubs",
            Stage::Documentation => "documentation",
        }
    }

    /// File-name friendly form of the label, used for run log entries.
    pub fn slug(self) -> &'static str {
        match self {
            Stage::Review => "review",
            Stage::Refactor => "refactor",
            Stage::TestStubs => "test-stubs",
            Stage::Documentation => "documentation",
        }
    }

    /// Heading of this stage's section in a multi-agent report.
    pub fn heading(self) -> &'static str {
        match self {
            Stage::Review => "Review",
            Stage::Refactor => "Refactored Code",
            Stage::TestStubs => "Test Stubs",
            Stage::Documentation => "Documentation",
        }
    }
}

pub fn build_prompt(stage: Stage, input: &ReviewInput) -> String {
    match stage {
        Stage::Review => build_review_prompt(input),
        Stage::Refactor => format!(
            "{}\n\nIssues:\n{}\n\nFunctions:\n{}\n\n{}\n\n{}\n",
            REFACTOR_INSTRUCTIONS,
            input.issues_text(),
            input.functions_text(),
            code_block(&input.source),
            REFACTOR_CLOSING
        ),
        Stage::TestStubs => format!(
            "{}\n\nFunctions:\n{}\n\n{}\n\n{}\n",
            TEST_STUBS_INSTRUCTIONS,
            input.functions_text(),
            code_block(&input.source),
            TEST_STUBS_CLOSING
        ),
        Stage::Documentation => format!(
            "{}\n\nFunctions:\n{}\n\n{}\n\n{}\n",
            DOCUMENTATION_INSTRUCTIONS,
            input.functions_text(),
            code_block(&input.source),
            DOCUMENTATION_CLOSING
        ),
    }
}

fn build_review_prompt(input: &ReviewInput) -> String {
    format!(
        "{}\n---\n### Original Code:\n```python\n{}\n```\n### Detected Issues:\n{}\n### Functions Defined:\n{}\n---\n{}",
        REVIEW_INSTRUCTIONS,
        input.source,
        input.issue_bullets(),
        input.functions_text(),
        REVIEW_ANSWER_HEADING
    )
}

fn code_block(source: &str) -> String {
    format!("Code:\n```python\n{source}\n```")
}
