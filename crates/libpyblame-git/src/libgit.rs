//! Authorship via libgit2, without spawning processes.

use std::collections::HashMap;
use std::path::Path;

use git2::{Oid, Repository};
use libpyblame_core::LineAuthorship;
use tracing::debug;

use crate::GitError;

/// In-process blame through `git2`.
///
/// Blames the committed content at HEAD, so lines that only exist in the
/// working tree are not covered and the result may be shorter than the
/// file on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibGitBlame;

impl LibGitBlame {
    pub fn new() -> Self {
        Self
    }

    /// Blame `path`, returning one author per committed line.
    pub fn blame(&self, path: &Path) -> Result<Vec<String>, GitError> {
        let dir = path.parent().ok_or(GitError::NotARepo)?;
        let repo = Repository::discover(dir)?;
        let workdir = repo.workdir().ok_or(GitError::NotARepo)?.canonicalize()?;

        let file = path.canonicalize()?;
        let rel = file
            .strip_prefix(&workdir)
            .map_err(|_| GitError::OutsideWorkTree(path.display().to_string()))?;

        let blame = repo.blame_file(rel, None)?;

        // Hunks from the same commit share one lookup.
        let mut names: HashMap<Oid, String> = HashMap::new();
        let mut authors = Vec::new();
        for hunk in blame.iter() {
            let oid = hunk.final_commit_id();
            let name = match names.get(&oid) {
                Some(name) => name.clone(),
                None => {
                    let commit = repo.find_commit(oid)?;
                    let name = String::from_utf8_lossy(commit.author().name_bytes()).into_owned();
                    names.insert(oid, name.clone());
                    name
                }
            };
            authors.extend(std::iter::repeat(name).take(hunk.lines_in_hunk()));
        }
        Ok(authors)
    }
}

impl LineAuthorship for LibGitBlame {
    fn authors_for(&self, path: &Path) -> Vec<String> {
        match self.blame(path) {
            Ok(authors) => authors,
            Err(e) => {
                debug!("no blame for {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}
