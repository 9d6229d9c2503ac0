//! Error types for Sage.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SageError {
    #[error("Unknown model '{0}'. Available: gemma:2b, mistral")]
    UnknownModel(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SageError {
    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            SageError::UnknownModel(_) => 64,
            SageError::Config(_) | SageError::Toml(_) => 78,
            SageError::Io(_) => 74,
        }
    }
}
