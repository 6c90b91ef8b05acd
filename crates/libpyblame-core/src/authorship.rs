//! Per-line authorship seam.
//!
//! Implementations live in `libpyblame-git`. An empty result means
//! "history unavailable" and is never an error.

use std::path::Path;

/// Source of per-line authors for a file
pub trait LineAuthorship: Send + Sync {
    /// One author per line of `path`, in file order, or empty when the
    /// file has no usable history.
    fn authors_for(&self, path: &Path) -> Vec<String>;
}

impl<F> LineAuthorship for F
where
    F: Fn(&Path) -> Vec<String> + Send + Sync,
{
    fn authors_for(&self, path: &Path) -> Vec<String> {
        self(path)
    }
}
