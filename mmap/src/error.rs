use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Input not found: {0}")]
    MissingInput(String),

    #[error("Failed to run `{0}`")]
    ToolSpawn(String, #[source] std::io::Error),

    #[error("`{0}` exited with {1}: {2}")]
    ToolFailed(String, ExitStatus, String),

    #[error("`{0}` did not finish within {1}s")]
    ToolTimeout(String, u64),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to read directory: {0}")]
    DirRead(String, #[source] std::io::Error),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(String, #[source] serde_yaml::Error),

    #[error("Failed to serialize facts")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Missing inputs are expected on partial trees and only worth a note.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Error::MissingInput(_))
    }
}
