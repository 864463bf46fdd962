use std::io;
use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Non-fatal outcome of a delete, query or report against a tree.
///
/// A failing operation never modifies the tree.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Empty Tree!")]
    EmptyTree,
    #[error("The string \"{key}\" does not exist.")]
    NotFound { key: String },
}

/// Errors that end a driver run.
#[derive(ThisError, Debug)]
pub enum DriverError {
    #[error("unable to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("invalid instruction '{0}'")]
    InvalidInstruction(char),
    #[error("instruction '{0}' is missing its operand")]
    MissingOperand(char),
}

impl DriverError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DriverError::Io { .. } => 3,
            DriverError::InvalidInstruction(_) | DriverError::MissingOperand(_) => 4,
            DriverError::Output(_) => 5,
        }
    }
}
