//! Top-level declaration extraction for Python sources via tree-sitter.

use std::sync::OnceLock;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use crate::filter::NodeFilter;
use crate::types::{Declaration, DeclarationKind, SpanMap};

// Only direct children of `module` match, so methods and nested
// functions are never reported. Decorated definitions report the
// span of the inner definition, starting at the `def`/`class` line.
const PYTHON_QUERY: &str = r#"
(module (function_definition name: (identifier) @name) @definition)
(module (class_definition name: (identifier) @name) @definition)
(module (decorated_definition
  definition: (function_definition name: (identifier) @name) @definition))
(module (decorated_definition
  definition: (class_definition name: (identifier) @name) @definition))
"#;

const PYTHON_KINDS: &[DeclarationKind] = &[
    DeclarationKind::Function, // function_definition
    DeclarationKind::Class,    // class_definition
    DeclarationKind::Function, // decorated function_definition
    DeclarationKind::Class,    // decorated class_definition
];

// Accepted by the grammar but rejected by Python 3
const PYTHON2_ONLY: &[&str] = &["print_statement", "exec_statement", "<>"];

fn python_language() -> Language {
    tree_sitter_python::LANGUAGE.into()
}

fn python_query() -> Option<&'static Query> {
    static QUERY: OnceLock<Option<Query>> = OnceLock::new();
    QUERY
        .get_or_init(|| match Query::new(&python_language(), PYTHON_QUERY) {
            Ok(query) => Some(query),
            Err(e) => {
                tracing::error!("failed to compile declaration query: {}", e);
                None
            }
        })
        .as_ref()
}

/// True if any node under `root` is Python 2 only syntax
fn has_python2_syntax(root: Node) -> bool {
    let mut cursor = root.walk();
    loop {
        if PYTHON2_ONLY.contains(&cursor.node().kind()) {
            return true;
        }
        if cursor.goto_first_child() || cursor.goto_next_sibling() {
            continue;
        }
        loop {
            if !cursor.goto_parent() {
                return false;
            }
            if cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

/// Row of the last non-comment token under `node`.
///
/// The grammar attaches indented comments after the last statement to the
/// enclosing block; they are not part of the definition.
fn last_code_row(node: Node) -> Option<usize> {
    if node.child_count() == 0 {
        return (node.kind() != "comment").then(|| node.end_position().row);
    }
    (0..node.child_count())
        .rev()
        .filter_map(|i| node.child(i))
        .find_map(last_code_row)
}

/// Parse `content` and return its top-level declarations in source order.
///
/// Returns `None` when the source does not parse cleanly: any ERROR or
/// MISSING node in the tree, or a Python 2 only statement, makes the whole
/// file unparsable.
pub fn declarations(content: &str) -> Option<Vec<Declaration>> {
    let lang = python_language();
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&lang) {
        tracing::error!("failed to load python grammar: {}", e);
        return None;
    }

    let tree = parser.parse(content, None)?;
    if tree.root_node().has_error() || has_python2_syntax(tree.root_node()) {
        return None;
    }

    let query = python_query()?;
    let name_idx = query.capture_index_for_name("name")?;
    let def_idx = query.capture_index_for_name("definition")?;

    let mut cursor = QueryCursor::new();
    let mut decls = Vec::new();

    let mut matches = cursor.matches(query, tree.root_node(), content.as_bytes());
    while let Some(m) = matches.next() {
        let mut name: Option<&str> = None;
        let mut span: Option<(u32, u32)> = None;

        for capture in m.captures {
            if capture.index == name_idx {
                name = capture.node.utf8_text(content.as_bytes()).ok();
            } else if capture.index == def_idx {
                let end = last_code_row(capture.node).unwrap_or(capture.node.end_position().row);
                span = Some((
                    capture.node.start_position().row as u32 + 1,
                    end as u32 + 1,
                ));
            }
        }

        if let (Some(name), Some((line_start, line_end))) = (name, span) {
            let Some(kind) = PYTHON_KINDS.get(m.pattern_index).copied() else {
                continue;
            };
            decls.push(Declaration {
                name: name.to_string(),
                kind,
                line_start,
                line_end,
            });
        }
    }

    decls.sort_by_key(|d| d.line_start);
    Some(decls)
}

/// Extract spans of top-level declarations accepted by `filter`.
///
/// A later declaration with an already-seen name replaces the earlier
/// span. Unparsable sources yield an empty map.
pub fn extract(content: &str, filter: &NodeFilter) -> SpanMap {
    let Some(decls) = declarations(content) else {
        tracing::debug!("source did not parse, no declarations extracted");
        return SpanMap::new();
    };

    decls
        .iter()
        .filter(|d| filter.matches(d))
        .map(|d| (d.name.clone(), d.span()))
        .collect()
}
