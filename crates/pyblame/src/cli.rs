use clap::Parser;
use std::path::PathBuf;

/// Blame Python code: attribute each test function to the author of most of its lines.
///
/// Currently supports only git, the checked-out revision, and test functions.
#[derive(Parser)]
#[command(name = "pyblame", version, about)]
pub struct Cli {
    /// Files or directories to blame (directories are searched for *.py)
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,
}
