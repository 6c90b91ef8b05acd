use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while collecting blame data.
///
/// These never leave the crate through [`libpyblame_core::LineAuthorship`];
/// providers log them and report "no history" instead.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("git blame exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },

    #[error("git blame timed out after {0:?}")]
    Timeout(Duration),

    #[error("Not a git repository")]
    NotARepo,

    #[error("Path outside work tree: {0}")]
    OutsideWorkTree(String),
}
