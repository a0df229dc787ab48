use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContourError {
    #[error("invalid {shape} parameter: {reason}")]
    InvalidParameter { shape: &'static str, reason: String },
}

impl ContourError {
    pub(crate) fn invalid(shape: &'static str, reason: impl Into<String>) -> Self {
        ContourError::InvalidParameter {
            shape,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ContourError>;
