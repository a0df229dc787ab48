//! Error type shared by the path model.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("path parse error at byte {position}: {reason}")]
    Parse { position: usize, reason: String },
    #[error("invalid path parameter: {reason}")]
    InvalidParameter { reason: String },
    #[error("incompatible paths: {reason}")]
    IncompatiblePaths { reason: String },
}

impl PathError {
    pub(crate) fn parse(position: usize, reason: impl Into<String>) -> Self {
        PathError::Parse {
            position,
            reason: reason.into(),
        }
    }

    pub(crate) fn incompatible(reason: impl Into<String>) -> Self {
        PathError::IncompatiblePaths {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PathError>;
