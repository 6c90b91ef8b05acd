//! Core library for pyblame.
//!
//! Attributes top-level Python declarations (by default, test functions)
//! to the author who wrote most of their lines:
//! - [`extractor`] finds declaration spans with tree-sitter
//! - [`authorship::LineAuthorship`] supplies per-line authors
//! - [`aggregate`] picks the dominant author per span
//! - [`pipeline`] ties them together over files and directories

pub mod aggregate;
pub mod authorship;
pub mod config;
pub mod discovery;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod pipeline;
pub mod types;

pub use authorship::LineAuthorship;
pub use config::{load_settings, Backend, OutputFormat, Settings};
pub use error::BlameError;
pub use filter::{NodeFilter, Predicate};
pub use pipeline::{blame, blame_in, BlameOptions};
pub use types::{BlameReport, Declaration, DeclarationKind, FileBlame, Span};
