//! Authorship via the `git blame` command line.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use libpyblame_core::LineAuthorship;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::porcelain::parse_authors;
use crate::GitError;

/// Runs `git blame --line-porcelain` in the blamed file's own directory.
///
/// The directory is passed to the child process, so the caller's working
/// directory is never changed and several files can be blamed at once.
#[derive(Debug, Clone)]
pub struct GitBlameCommand {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl Default for GitBlameCommand {
    fn default() -> Self {
        Self::new(None)
    }
}

impl GitBlameCommand {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            program: PathBuf::from("git"),
            timeout,
        }
    }

    /// Use a different git executable
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Blame `path`, returning one author per line.
    ///
    /// Blocks the calling thread on a single-threaded runtime, so this can
    /// be called from any worker pool.
    pub fn blame(&self, path: &Path) -> Result<Vec<String>, GitError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run(path))
    }

    async fn run(&self, path: &Path) -> Result<Vec<String>, GitError> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let name = path.file_name().unwrap_or(path.as_os_str());

        let mut command = Command::new(&self.program);
        command
            .args(["blame", "--line-porcelain", "--"])
            .arg(name)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // a timed-out child is killed when its future is dropped
        let output = match self.timeout {
            Some(limit) => timeout(limit, command.output())
                .await
                .map_err(|_| GitError::Timeout(limit))??,
            None => command.output().await?,
        };

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_authors(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl LineAuthorship for GitBlameCommand {
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
