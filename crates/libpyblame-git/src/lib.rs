//! Git authorship providers for pyblame
//!
//! Two implementations of [`LineAuthorship`]:
//! - [`GitBlameCommand`] shells out to `git blame --line-porcelain`
//! - [`LibGitBlame`] blames in-process through libgit2

mod command;
mod error;
mod libgit;
mod porcelain;

#[cfg(test)]
mod testutil;

use std::time::Duration;

use libpyblame_core::{Backend, LineAuthorship};

pub use command::GitBlameCommand;
pub use error::GitError;
pub use libgit::LibGitBlame;
pub use porcelain::{parse_authors, AUTHOR_PREFIX};

/// Build the provider selected by `backend`
pub fn provider(backend: Backend, timeout: Option<Duration>) -> Box<dyn LineAuthorship> {
    match backend {
        Backend::Command => Box::new(GitBlameCommand::new(timeout)),
        Backend::Libgit2 => Box::new(LibGitBlame::new()),
    }
}
