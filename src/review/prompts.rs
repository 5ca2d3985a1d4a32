// Instruction text for each review stage. The prompt builder wraps these with
// the source code, the lint issues and the function list.

pub const REVIEW_INSTRUCTIONS: &str = r#"You are a senior Python developer and code reviewer.
Analyze the following code for style issues, bugs, performance bottlenecks, and refactor it.
Provide inline comments on what changed and why, and output the full refactored snippets."#;

pub const REVIEW_ANSWER_HEADING: &str = "### Refactored Code and Suggestions:";

pub const REFACTOR_INSTRUCTIONS: &str = "You are a senior Python developer. Refactor the following code, addressing the issues, and add inline comments explaining your changes.";

pub const REFACTOR_CLOSING: &str = "Provide only the refactored code block.";

pub const TEST_STUBS_INSTRUCTIONS: &str =
    "You are a Python QA engineer. Generate pytest unit test stubs for each function listed.";

pub const TEST_STUBS_CLOSING: &str = "Provide only the test stubs.";

pub const DOCUMENTATION_INSTRUCTIONS: &str =
    "You are a technical writer. Write Markdown documentation for the following Python module.";

pub const DOCUMENTATION_CLOSING: &str = "Provide only the documentation section.";

pub const NO_ISSUES_PLACEHOLDER: &str = "<no issues>";

pub const NO_FUNCTIONS_PLACEHOLDER: &str = "<none>";
