use super::Logger;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_logger_happy_path() {
    let root = TempDir::new().unwrap();
    let logger = Logger::new(root.path(), "multi-agent").expect("Failed to create Logger");

    let dir_name = logger
        .log_dir()
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap()
        .to_string();
    assert!(dir_name.ends_with("-multi-agent"));
    assert_eq!(logger.log_dir().parent().unwrap(), root.path());

    logger
        .log_text("1-refactor-query.txt", "the prompt")
        .expect("Failed to log text");
    let json_content = json!({ "status": "success", "totalResponseTime": 12 });
    logger
        .log_json("1-refactor-response.json", &json_content)
        .expect("Failed to log JSON");

    let stored_text = fs::read_to_string(logger.log_dir().join("1-refactor-query.txt")).unwrap();
    assert_eq!(stored_text, "the prompt");

    let stored_json =
        fs::read_to_string(logger.log_dir().join("1-refactor-response.json")).unwrap();
    assert_eq!(
        stored_json,
        serde_json::to_string_pretty(&json_content).unwrap()
    );
}

#[test]
fn test_logger_without_suffix_uses_bare_timestamp() {
    let root = TempDir::new().unwrap();
    let logger = Logger::new(root.path(), "").unwrap();
    let dir_name = logger.log_dir().file_name().unwrap().to_str().unwrap();
    // %Y-%m-%d-%H-%M-%S
    assert_eq!(dir_name.len(), 19);
    assert!(logger.log_dir().is_dir());
}
