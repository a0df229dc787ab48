//! Configuration for interpolation and morphing

use serde::{Deserialize, Serialize};

use crate::color::ColorSpace;
use crate::easing::Easing;
use crate::error::AnimationError;
use crate::morph::MorphMethod;

/// Library-wide animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Maximum cached morph results per morpher (`None` = unbounded)
    pub max_cache_size: Option<usize>,
    /// Easing applied when neither overrides nor variant defaults name one
    pub default_easing: Easing,
    /// Correspondence strategy for path fields
    pub morph_method: MorphMethod,
    /// Points per subpath when morph strategies resample
    pub sample_count: usize,
    /// Start/end distance under which a path counts as closed
    pub closed_tolerance: f64,
    /// Color blending space
    pub color_space: ColorSpace,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            max_cache_size: Some(64),
            default_easing: Easing::Linear,
            morph_method: MorphMethod::Auto,
            sample_count: 128,
            closed_tolerance: 0.01,
            color_space: ColorSpace::Rgb,
        }
    }
}

impl AnimationConfig {
    /// Dense resampling and a large cache
    pub fn high_quality() -> Self {
        Self {
            max_cache_size: Some(512),
            sample_count: 512,
            closed_tolerance: 0.001,
            ..Self::default()
        }
    }

    /// Small cache and coarse resampling
    pub fn low_memory() -> Self {
        Self {
            max_cache_size: Some(8),
            sample_count: 32,
            ..Self::default()
        }
    }

    /// Parse a JSON document and validate it
    pub fn from_json_str(json: &str) -> Result<Self, AnimationError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AnimationError> {
        if self.max_cache_size == Some(0) {
            return Err(AnimationError::InvalidConfig {
                reason: "max_cache_size must be greater than 0 (use null for unbounded)".to_string(),
            });
        }
        if self.sample_count < 3 {
            return Err(AnimationError::InvalidConfig {
                reason: format!("sample_count must be at least 3, got {}", self.sample_count),
            });
        }
        if !self.closed_tolerance.is_finite() || self.closed_tolerance < 0.0 {
            return Err(AnimationError::InvalidConfig {
                reason: format!(
                    "closed_tolerance must be finite and non-negative, got {}",
                    self.closed_tolerance
                ),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn with_max_cache_size(mut self, size: Option<usize>) -> Self {
        self.max_cache_size = size;
        self
    }

    #[inline]
    pub fn with_default_easing(mut self, easing: Easing) -> Self {
        self.default_easing = easing;
        self
    }

    #[inline]
    pub fn with_morph_method(mut self, method: MorphMethod) -> Self {
        self.morph_method = method;
        self
    }

    #[inline]
    pub fn with_sample_count(mut self, count: usize) -> Self {
        self.sample_count = count;
        self
    }

    #[inline]
    pub fn with_closed_tolerance(mut self, tolerance: f64) -> Self {
        self.closed_tolerance = tolerance;
        self
    }

    #[inline]
    pub fn with_color_space(mut self, space: ColorSpace) -> Self {
        self.color_space = space;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert!(AnimationConfig::default().validate().is_ok());
        assert!(AnimationConfig::high_quality().validate().is_ok());
        assert!(AnimationConfig::low_memory().validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let zero = AnimationConfig::default().with_max_cache_size(Some(0));
        assert!(matches!(zero.validate(), Err(AnimationError::InvalidConfig { .. })));
        assert!(AnimationConfig::default().with_sample_count(2).validate().is_err());
        assert!(AnimationConfig::default()
            .with_closed_tolerance(f64::NAN)
            .validate()
            .is_err());
        assert!(AnimationConfig::default().with_max_cache_size(None).validate().is_ok());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = AnimationConfig::from_json_str(r#"{"sample_count": 16, "color_space": "hsv"}"#).unwrap();
        assert_eq!(config.sample_count, 16);
        assert_eq!(config.color_space, ColorSpace::Hsv);
        assert_eq!(config.max_cache_size, Some(64));
    }

    #[test]
    fn invalid_json_is_serialization_error() {
        let err = AnimationConfig::from_json_str("{").unwrap_err();
        assert_eq!(err.category(), "serialization");
        let err = AnimationConfig::from_json_str(r#"{"sample_count": 1}"#).unwrap_err();
        assert_eq!(err.category(), "config");
    }
}
