use thiserror::Error;

/// Main error type for pyblame operations
#[derive(Debug, Error)]
pub enum BlameError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl BlameError {
    /// Short machine-readable code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            BlameError::InvalidArgs(_) => "invalid_args",
            BlameError::Io(_) => "io_error",
            BlameError::Walk(_) => "io_error",
            BlameError::TomlParse(_) => "invalid_args",
            BlameError::Yaml(_) => "internal_error",
            BlameError::Json(_) => "internal_error",
            BlameError::Internal(_) => "internal_error",
        }
    }

    /// Process exit code; usage and config problems share clap's code 2
    pub fn exit_code(&self) -> i32 {
        match self {
            BlameError::InvalidArgs(_) => 2,
            BlameError::TomlParse(_) => 2,
            _ => 1,
        }
    }

    /// Hints printed under the error message
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            BlameError::TomlParse(_) => vec![
                "Check pyblame.toml for typos; unknown keys are rejected",
            ],
            BlameError::InvalidArgs(msg) if msg.starts_with("PYBLAME_") => vec![
                "Unset the variable or give it a valid value",
            ],
            BlameError::Walk(_) => vec![
                "Check that every path argument exists and is readable",
            ],
            _ => vec![],
        }
    }
}

pub type Result<T> = std::result::Result<T, BlameError>;
