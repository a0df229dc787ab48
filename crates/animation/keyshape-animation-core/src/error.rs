//! Error types for keyframe interpolation and morphing

use keyshape_contour_core::ContourError;
use keyshape_path_core::PathError;
use serde::{Deserialize, Serialize};

/// Error type for animation-core operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// Two states of different variants were blended
    #[error("Incompatible state kinds: cannot blend {expected} with {found}")]
    IncompatibleStateKind { expected: String, found: String },

    /// A progress or time input was not a usable number
    #[error("Type error: {reason}")]
    TypeError { reason: String },

    /// A value object was built with an out-of-domain parameter
    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameter { field: String, reason: String },

    /// Two keyframes share a time on one track
    #[error("Duplicate keyframe at time {time}")]
    DuplicateKeyframe { time: f64 },

    /// Configuration failed validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Path model error
    #[error("Path error: {message}")]
    Path { message: String },

    /// Contour generation error
    #[error("Contour error: {message}")]
    Contour { message: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl AnimationError {
    pub fn invalid_parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn type_error(reason: impl Into<String>) -> Self {
        Self::TypeError {
            reason: reason.into(),
        }
    }

    /// Errors the caller can route around by fixing one input value
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TypeError { .. } | Self::DuplicateKeyframe { .. } | Self::InvalidConfig { .. }
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::IncompatibleStateKind { .. } => "interpolation",
            Self::TypeError { .. } | Self::InvalidParameter { .. } => "validation",
            Self::DuplicateKeyframe { .. } => "track",
            Self::InvalidConfig { .. } => "config",
            Self::Path { .. } | Self::Contour { .. } => "geometry",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<PathError> for AnimationError {
    fn from(err: PathError) -> Self {
        Self::Path {
            message: err.to_string(),
        }
    }
}

impl From<ContourError> for AnimationError {
    fn from(err: ContourError) -> Self {
        match err {
            ContourError::InvalidParameter { shape, reason } => Self::InvalidParameter {
                field: shape.to_string(),
                reason,
            },
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}
