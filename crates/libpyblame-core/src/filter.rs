//! Declaration filters.
//!
//! A [`NodeFilter`] is an ordered list of [`Predicate`]s joined by logical
//! AND. The empty filter accepts every declaration.

use crate::types::Declaration;

/// Name prefix that marks a test function
pub const DEFAULT_TEST_PREFIX: &str = "test_";

/// A single condition on a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Declaration is a function (sync or async)
    Function,
    /// Declaration name starts with the given prefix
    NamePrefix(String),
}

impl Predicate {
    pub fn matches(&self, decl: &Declaration) -> bool {
        match self {
            Predicate::Function => decl.kind.is_function(),
            Predicate::NamePrefix(prefix) => decl.name.starts_with(prefix.as_str()),
        }
    }
}

/// Conjunction of predicates, shared read-only for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeFilter {
    predicates: Vec<Predicate>,
}

impl NodeFilter {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    /// Functions named `test_*`
    pub fn tests() -> Self {
        Self::tests_with_prefix(DEFAULT_TEST_PREFIX)
    }

    /// Functions whose name starts with `prefix`
    pub fn tests_with_prefix(prefix: &str) -> Self {
        Self::new(vec![
            Predicate::Function,
            Predicate::NamePrefix(prefix.to_string()),
        ])
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches(&self, decl: &Declaration) -> bool {
        self.predicates.iter().all(|p| p.matches(decl))
    }
}
