//! Error types for the slider puzzle crate

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl Error {
    pub(crate) fn invalid_board(reason: impl Into<String>) -> Self {
        Error::InvalidBoard {
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
