use crate::app_error::AppError;
use std::collections::VecDeque;
use tree_sitter::{Language, Node, Parser, Tree};

// Wrapper nodes that tree-sitter emits but the Python AST does not have.
// Their children are treated as children of the enclosing node so that the
// breadth-first levels line up with `ast.walk`. The `else` of an `if` is
// handled separately, see `enqueue_or_else`.
const TRANSPARENT_KINDS: &[&str] = &[
    "block",
    "decorated_definition",
    "else_clause",
    "finally_clause",
];

// Extras that may sit at any indentation.
const UNINDENTED_KINDS: &[&str] = &["comment", "line_continuation"];

enum Visit<'t> {
    Node(Node<'t>),
    // Remaining `elif`/`else` clauses of an `if`. Python nests each `elif`
    // as an `If` inside the `orelse` of the previous one.
    OrElse(Vec<Node<'t>>),
}

/// Returns the name of every `def` in `source`, breadth-first.
///
/// Definitions on the same statement depth come out in source order; all of
/// them come before any definition nested one level deeper. Methods and
/// nested functions are included, and duplicate names are kept.
pub fn extract_functions(source: &str) -> Result<Vec<String>, AppError> {
    let tree = parse_python(source)?;
    let root = tree.root_node();

    if root.has_error() {
        return Err(AppError::Parse(describe_syntax_error(root)));
    }
    validate(root)?;

    let mut names = Vec::new();
    let mut queue = VecDeque::from([Visit::Node(root)]);
    while let Some(visit) = queue.pop_front() {
        let node = match visit {
            Visit::Node(node) => node,
            Visit::OrElse(clauses) => {
                if let Some((elif, rest)) = clauses.split_first() {
                    enqueue_children(*elif, &mut queue);
                    enqueue_or_else(rest, &mut queue);
                }
                continue;
            }
        };

        if node.kind() == "if_statement" {
            enqueue_if(node, &mut queue);
        } else {
            enqueue_children(node, &mut queue);
        }

        if node.kind() == "function_definition" {
            if let Some(name) = node.child_by_field_name("name") {
                let text = name
                    .utf8_text(source.as_bytes())
                    .map_err(|e| AppError::Parse(format!("Invalid UTF-8 in function name: {e}")))?;
                names.push(text.to_string());
            }
        }
    }
    Ok(names)
}

fn parse_python(source: &str) -> Result<Tree, AppError> {
    let language: Language = tree_sitter_python::LANGUAGE.into();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| AppError::Parse(format!("Failed to load the Python grammar: {e}")))?;
    parser
        .parse(source, None)
        .ok_or_else(|| AppError::Parse("Parser produced no syntax tree".to_string()))
}

fn enqueue_children<'t>(node: Node<'t>, queue: &mut VecDeque<Visit<'t>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        enqueue_flattened(child, queue);
    }
}

fn enqueue_flattened<'t>(node: Node<'t>, queue: &mut VecDeque<Visit<'t>>) {
    if TRANSPARENT_KINDS.contains(&node.kind()) {
        enqueue_children(node, queue);
    } else {
        queue.push_back(Visit::Node(node));
    }
}

fn enqueue_if<'t>(node: Node<'t>, queue: &mut VecDeque<Visit<'t>>) {
    let mut cursor = node.walk();
    let (clauses, head): (Vec<Node>, Vec<Node>) = node
        .named_children(&mut cursor)
        .partition(|child| matches!(child.kind(), "elif_clause" | "else_clause"));
    for child in head {
        enqueue_flattened(child, queue);
    }
    enqueue_or_else(&clauses, queue);
}

fn enqueue_or_else<'t>(clauses: &[Node<'t>], queue: &mut VecDeque<Visit<'t>>) {
    match clauses.first() {
        None => {}
        Some(clause) if clause.kind() == "else_clause" => enqueue_children(*clause, queue),
        Some(_) => queue.push_back(Visit::OrElse(clauses.to_vec())),
    }
}

// tree-sitter-python recovers from misindented lines and still knows the
// Python 2 statement forms; CPython rejects both.
fn validate(node: Node) -> Result<(), AppError> {
    match node.kind() {
        "print_statement" => {
            return Err(AppError::Parse(format!(
                "Missing parentheses in call to 'print' {}",
                location(node)
            )))
        }
        "exec_statement" => {
            return Err(AppError::Parse(format!(
                "Missing parentheses in call to 'exec' {}",
                location(node)
            )))
        }
        "module" | "block" => check_indentation(node)?,
        _ => {}
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    children.into_iter().try_for_each(validate)
}

/// Every statement that starts a line must start in the same column as its
/// siblings; module-level statements start in column 0.
fn check_indentation(node: Node) -> Result<(), AppError> {
    let mut expected_column = if node.kind() == "module" { Some(0) } else { None };
    let mut previous_end_row: Option<usize> = None;

    let mut cursor = node.walk();
    let statements = node
        .named_children(&mut cursor)
        .filter(|child| !UNINDENTED_KINDS.contains(&child.kind()));

    for statement in statements {
        let start = statement.start_position();
        let continues_line = previous_end_row == Some(start.row);
        previous_end_row = Some(statement.end_position().row);
        if continues_line {
            continue;
        }
        match expected_column {
            None => expected_column = Some(start.column),
            Some(column) if column == start.column => {}
            Some(column) => {
                let what = if start.column > column {
                    "unexpected indent"
                } else {
                    "unindent does not match any outer indentation level"
                };
                return Err(AppError::Parse(format!("{what} {}", location(statement))));
            }
        }
    }
    Ok(())
}

fn location(node: Node) -> String {
    let pos = node.start_position();
    format!("at line {}, column {}", pos.row + 1, pos.column + 1)
}

fn describe_syntax_error(root: Node) -> String {
    match first_error_node(root) {
        Some(node) => {
            let what = if node.is_missing() {
                format!("missing '{}'", node.kind())
            } else {
                "invalid syntax".to_string()
            };
            format!("{what} {}", location(node))
        }
        None => "invalid syntax".to_string(),
    }
}

fn first_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error_node)
}
