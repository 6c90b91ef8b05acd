use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BlameError, Result};
use crate::filter::DEFAULT_TEST_PREFIX;

/// File name looked up in the working directory
pub const CONFIG_FILE: &str = "pyblame.toml";

/// Which authorship backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// `git blame --line-porcelain` subprocess
    #[default]
    Command,
    /// In-process blame through libgit2
    Libgit2,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "command" => Ok(Backend::Command),
            "libgit2" => Ok(Backend::Libgit2),
            other => Err(format!("unknown backend '{}' (expected command or libgit2)", other)),
        }
    }
}

/// Report serialization format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "yaml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format '{}' (expected yaml or json)", other)),
        }
    }
}

/// Run settings, read from pyblame.toml and PYBLAME_* variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub backend: Backend,
    /// Blame timeout in seconds for the command backend; 0 disables it
    pub timeout_secs: u64,
    /// Worker threads; 0 lets rayon pick one per CPU
    pub jobs: usize,
    pub test_prefix: String,
    /// Extension of source files discovered under directories
    pub extension: String,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: Backend::Command,
            timeout_secs: 30,
            jobs: 0,
            test_prefix: DEFAULT_TEST_PREFIX.to_string(),
            extension: "py".to_string(),
            format: OutputFormat::Yaml,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Apply overrides from a variable lookup (normally `std::env::var`)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PYBLAME_BACKEND") {
            self.backend = parse_env("PYBLAME_BACKEND", &v)?;
        }
        if let Some(v) = lookup("PYBLAME_TIMEOUT_SECS") {
            self.timeout_secs = parse_env("PYBLAME_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("PYBLAME_JOBS") {
            self.jobs = parse_env("PYBLAME_JOBS", &v)?;
        }
        if let Some(v) = lookup("PYBLAME_FORMAT") {
            self.format = parse_env("PYBLAME_FORMAT", &v)?;
        }
        Ok(())
    }
}

fn parse_env<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| BlameError::InvalidArgs(format!("{}: {}", name, e)))
}

/// Load settings from `dir/pyblame.toml`, if present
pub fn load_settings_file(dir: &Path) -> Result<Option<Settings>> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&config_path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(Some(settings))
}

/// Defaults, then `dir/pyblame.toml`, then the process environment
pub fn load_settings(dir: &Path) -> Result<Settings> {
    let mut settings = load_settings_file(dir)?.unwrap_or_default();
    settings.apply_env(|name| std::env::var(name).ok())?;
    Ok(settings)
}
