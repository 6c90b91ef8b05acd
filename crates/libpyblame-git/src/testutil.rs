//! Throwaway repositories for tests.

use std::path::Path;
use std::process::Command;

use git2::{Commit, Repository, Signature};

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

pub fn init_repo(dir: &Path) -> Repository {
    Repository::init(dir).unwrap()
}

/// Write `content` to `rel` and commit it as `author`.
pub fn commit_file(repo: &Repository, rel: &str, content: &str, author: &str) {
    let workdir = repo.workdir().unwrap();
    let path = workdir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(rel)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let email = format!("{}@example.com", author.to_lowercase());
    let sig = Signature::now(author, &email).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, &format!("edit {}", rel), &tree, &parents)
        .unwrap();
}
