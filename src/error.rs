use std::io;
use thiserror::Error;

/// Everything that can stop an `ecs-session` run.
///
/// Only `main` turns one of these into a process exit.
#[derive(Debug, Error)]
pub enum Error {
    /// An inventory call against ECS failed.
    #[error("Unable to {operation}: {message}")]
    Query {
        operation: &'static str,
        message: String,
    },

    /// A stage was entered before its parent selection was made.
    #[error("No {0} selected")]
    MissingSelection(&'static str),

    /// The remote side refused execute-command for the target.
    #[error("Service does not have execute-command enabled: {0}")]
    ExecuteCommandDisabled(String),

    #[error("Failed to start execute-command session: {0}")]
    Launch(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn query(operation: &'static str, err: impl std::error::Error) -> Self {
        Self::Query {
            operation,
            message: aws_sdk_ecs::error::DisplayErrorContext(err).to_string(),
        }
    }
}
