//! End-to-end tests for the pyblame binary

use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use git2::{Commit, Repository, Signature};
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn git_available() -> bool {
    StdCommand::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Temp repository with a canonical root, matching what the binary sees as cwd
fn repo() -> (TempDir, PathBuf, Repository) {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let repo = Repository::init(&root).unwrap();
    (dir, root, repo)
}

fn commit_file(repo: &Repository, rel: &str, content: &str, author: &str) {
    let path = repo.workdir().unwrap().join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(rel)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let sig = Signature::now(author, &format!("{}@example.com", author.to_lowercase())).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, "edit", &tree, &parents).unwrap();
}

fn pyblame(cwd: &Path, backend: &str) -> Command {
    let mut cmd = Command::cargo_bin("pyblame").unwrap();
    cmd.current_dir(cwd)
        .env("PYBLAME_BACKEND", backend)
        .env_remove("PYBLAME_FORMAT")
        .env_remove("PYBLAME_JOBS")
        .env_remove("PYBLAME_TIMEOUT_SECS")
        .env_remove("RUST_LOG");
    cmd
}

fn run_yaml(cwd: &Path, backend: &str, args: &[&str]) -> serde_yaml::Value {
    let output = pyblame(cwd, backend).args(args).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_yaml::from_slice(&output.stdout).unwrap()
}

fn key(root: &Path, rel: &str) -> String {
    root.join(rel).to_string_lossy().into_owned()
}

/// Backends to exercise: libgit2 always, the git CLI when installed
fn backends() -> Vec<&'static str> {
    if git_available() {
        vec!["libgit2", "command"]
    } else {
        vec!["libgit2"]
    }
}

#[test]
fn test_single_author() {
    let (_dir, root, repo) = repo();
    commit_file(&repo, "test_a.py", "def test_a():\n    pass\n", "Alice");

    for backend in backends() {
        let out = run_yaml(&root, backend, &["test_a.py"]);
        let file = &out[key(&root, "test_a.py").as_str()];
        assert_eq!(file["test_a"].as_str(), Some("Alice"), "backend {}", backend);
        assert_eq!(file.as_mapping().unwrap().len(), 1);
    }
}

#[test]
fn test_plurality_author() {
    let (_dir, root, repo) = repo();
    commit_file(&repo, "test_b.py", "def test_b():\n    x = 1\n", "Bob");
    commit_file(&repo, "test_b.py", "def test_b():\n    x = 1\n    y = 2\n", "Carol");

    for backend in backends() {
        let out = run_yaml(&root, backend, &["test_b.py"]);
        assert_eq!(
            out[key(&root, "test_b.py").as_str()]["test_b"].as_str(),
            Some("Bob"),
            "backend {}",
            backend
        );
    }
}

#[test]
fn test_helpers_are_not_reported() {
    let (_dir, root, repo) = repo();
    commit_file(
        &repo,
        "tests/test_mod.py",
        "def helper():\n    return 1\n\ndef test_uses_helper():\n    assert helper() == 1\n",
        "Dana",
    );
    commit_file(&repo, "README.md", "not python\n", "Dana");

    let out = run_yaml(&root, "libgit2", &["tests"]);
    let top = out.as_mapping().unwrap();
    assert_eq!(top.len(), 1);

    let file = &out[key(&root, "tests/test_mod.py").as_str()];
    assert!(file.get("helper").is_none());
    assert_eq!(file["test_uses_helper"].as_str(), Some("Dana"));
}

#[test]
fn test_untracked_file_is_empty() {
    let (_dir, root, repo) = repo();
    commit_file(&repo, "tracked.py", "x = 1\n", "Alice");
    std::fs::write(root.join("test_new.py"), "def test_new():\n    pass\n").unwrap();

    for backend in backends() {
        let out = run_yaml(&root, backend, &["test_new.py"]);
        let file = &out[key(&root, "test_new.py").as_str()];
        assert!(file.as_mapping().unwrap().is_empty(), "backend {}", backend);
    }
}

#[test]
fn test_syntax_error_is_empty() {
    let (_dir, root, repo) = repo();
    commit_file(&repo, "test_bad.py", "def test_bad(:\n    pass\n", "Alice");

    let out = run_yaml(&root, "libgit2", &["test_bad.py"]);
    assert!(out[key(&root, "test_bad.py").as_str()].as_mapping().unwrap().is_empty());
}

#[test]
fn test_redefinition_attributes_second_definition() {
    let (_dir, root, repo) = repo();
    commit_file(&repo, "test_dup.py", "def test_x():\n    pass\n", "Old");
    commit_file(
        &repo,
        "test_dup.py",
        "def test_x():\n    pass\n\ndef test_x():\n    assert True\n",
        "New",
    );

    let out = run_yaml(&root, "libgit2", &["test_dup.py"]);
    let file = &out[key(&root, "test_dup.py").as_str()];
    assert_eq!(file.as_mapping().unwrap().len(), 1);
    assert_eq!(file["test_x"].as_str(), Some("New"));
}

#[test]
fn test_defaults_to_current_directory() {
    let (_dir, root, repo) = repo();
    commit_file(&repo, "a/test_one.py", "def test_one():\n    pass\n", "Alice");
    commit_file(&repo, "b/test_two.py", "def test_two():\n    pass\n", "Bob");

    let out = run_yaml(&root, "libgit2", &[]);
    let keys: Vec<&str> = out
        .as_mapping()
        .unwrap()
        .keys()
        .map(|k| k.as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec![key(&root, "a/test_one.py").as_str(), key(&root, "b/test_two.py").as_str()]
    );
}

#[test]
fn test_output_is_repeatable() {
    let (_dir, root, repo) = repo();
    for i in 0..5 {
        let rel = format!("pkg/test_{}.py", i);
        let author = if i % 2 == 0 { "Alice" } else { "Bob" };
        commit_file(&repo, &rel, &format!("def test_{}():\n    pass\n", i), author);
    }

    let first = pyblame(&root, "libgit2").output().unwrap().stdout;
    let second = pyblame(&root, "libgit2").env("PYBLAME_JOBS", "1").output().unwrap().stdout;
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_json_format() {
    let (_dir, root, repo) = repo();
    commit_file(&repo, "test_a.py", "def test_a():\n    pass\n", "Alice");

    let output = pyblame(&root, "libgit2")
        .env("PYBLAME_FORMAT", "json")
        .arg("test_a.py")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[key(&root, "test_a.py")]["test_a"], "Alice");
}

#[test]
fn test_config_file_prefix() {
    let (_dir, root, repo) = repo();
    commit_file(
        &repo,
        "checks.py",
        "def check_login():\n    pass\n\ndef test_other():\n    pass\n",
        "Erin",
    );
    std::fs::write(root.join("pyblame.toml"), "test_prefix = \"check_\"\n").unwrap();

    let out = run_yaml(&root, "libgit2", &["checks.py"]);
    let file = &out[key(&root, "checks.py").as_str()];
    assert_eq!(file.as_mapping().unwrap().len(), 1);
    assert_eq!(file["check_login"].as_str(), Some("Erin"));
}

#[test]
fn test_bad_config_file() {
    let (_dir, root, _repo) = repo();
    std::fs::write(root.join("pyblame.toml"), "jobs = \"lots\"\n").unwrap();

    pyblame(&root, "libgit2")
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("error:"));
}

#[test]
fn test_bad_env_value() {
    let (_dir, root, _repo) = repo();

    pyblame(&root, "svn")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("PYBLAME_BACKEND"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let dir = tempdir().unwrap();
    pyblame(dir.path(), "libgit2")
        .arg("--frobnicate")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_version() {
    let dir = tempdir().unwrap();
    pyblame(dir.path(), "libgit2")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_outside_repository_still_succeeds() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    std::fs::write(root.join("test_loose.py"), "def test_loose():\n    pass\n").unwrap();

    for backend in backends() {
        let out = run_yaml(&root, backend, &["test_loose.py"]);
        assert!(out[key(&root, "test_loose.py").as_str()].as_mapping().unwrap().is_empty());
    }
}
