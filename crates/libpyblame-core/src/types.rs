use indexmap::IndexMap;

/// Kind of top-level declaration reported by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Function,
    Class,
}

impl DeclarationKind {
    pub fn is_function(self) -> bool {
        matches!(self, DeclarationKind::Function)
    }
}

/// A named top-level declaration and its line range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    pub line_start: u32,
    pub line_end: u32,
}

impl Declaration {
    pub fn span(&self) -> Span {
        Span {
            first_line: self.line_start,
            last_line: self.line_end,
        }
    }
}

/// Inclusive, 1-based line range of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub first_line: u32,
    pub last_line: u32,
}

impl Span {
    pub fn new(first_line: u32, last_line: u32) -> Self {
        Self { first_line, last_line }
    }
}

/// Declaration name to span, in order of first appearance in the file
pub type SpanMap = IndexMap<String, Span>;

/// Declaration name to attributed author
pub type FileBlame = IndexMap<String, String>;

/// Absolute file path to that file's attributions
pub type BlameReport = IndexMap<String, FileBlame>;
