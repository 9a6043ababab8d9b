use thiserror::Error;

/// Errors reported by a command that could not be applied or reverted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("invalid command: {0}")]
    Invalid(&'static str),
    #[error("{0}")]
    Failed(String),
}

impl CommandError {
    pub fn failed(message: impl Into<String>) -> Self {
        CommandError::Failed(message.into())
    }
}
