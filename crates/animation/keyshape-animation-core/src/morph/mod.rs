//! Shape morphing between two endpoint paths.
//!
//! A [`Morpher`] owns its endpoint paths and an LRU cache of intermediate
//! paths keyed by strategy and progress. Dropping a morpher releases its cache, so a
//! morpher scoped to a block is cleaned up on every exit path, including
//! early returns through `?` and unwinding.

mod cache;
mod strategy;

use keyshape_path_core::Path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnimationConfig;
use crate::error::AnimationError;

pub use cache::{CacheStats, LISTED_PROGRESS_LIMIT};
use cache::{MorphKey, ProgressCache};
pub(crate) use strategy::align_ring;

/// Point-correspondence strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphMethod {
    /// Resample open outlines and lerp point by point
    Stroke,
    /// Resample and align closed rings before lerping
    Shape,
    /// `Shape` when both endpoints are closed, `Stroke` otherwise
    #[default]
    Auto,
}

impl MorphMethod {
    pub fn name(&self) -> &'static str {
        match self {
            MorphMethod::Stroke => "stroke",
            MorphMethod::Shape => "shape",
            MorphMethod::Auto => "auto",
        }
    }
}

/// Computes and caches intermediate paths between `start` and `end`.
pub struct Morpher {
    start: Path,
    end: Path,
    method: MorphMethod,
    sample_count: usize,
    closed_tolerance: f64,
    cache: ProgressCache,
    disposed: bool,
}

impl Morpher {
    /// Morpher with the default configuration.
    pub fn new(start: Path, end: Path) -> Self {
        Self::with_config(start, end, &AnimationConfig::default())
    }

    pub fn with_config(start: Path, end: Path, config: &AnimationConfig) -> Self {
        Self {
            start,
            end,
            method: config.morph_method,
            sample_count: config.sample_count.max(3),
            closed_tolerance: config.closed_tolerance,
            cache: ProgressCache::new(config.max_cache_size),
            disposed: false,
        }
    }

    pub fn with_method(mut self, method: MorphMethod) -> Self {
        self.method = method;
        self
    }

    pub fn start(&self) -> &Path {
        &self.start
    }

    pub fn end(&self) -> &Path {
        &self.end
    }

    pub fn method(&self) -> MorphMethod {
        self.method
    }

    /// The strategy `Auto` resolves to for these endpoints.
    pub fn resolved_method(&self, method: MorphMethod) -> MorphMethod {
        match method {
            MorphMethod::Auto => {
                if self.start.is_closed(self.closed_tolerance) && self.end.is_closed(self.closed_tolerance) {
                    MorphMethod::Shape
                } else {
                    MorphMethod::Stroke
                }
            }
            explicit => explicit,
        }
    }

    /// Intermediate path at `progress` using the morpher's own method.
    ///
    /// Non-finite progress fails with [`AnimationError::TypeError`]. Values
    /// outside `[0, 1]` are accepted so that overshooting easings still
    /// produce a path.
    pub fn morph(&mut self, progress: f64) -> Result<Path, AnimationError> {
        self.morph_with(progress, self.method)
    }

    /// Like [`morph`](Self::morph) with the strategy chosen per call. Results
    /// are cached per resolved strategy, so `Auto` shares entries with the
    /// strategy it resolves to.
    pub fn morph_with(&mut self, progress: f64, method: MorphMethod) -> Result<Path, AnimationError> {
        if !progress.is_finite() {
            return Err(AnimationError::type_error(format!(
                "progress must be a finite number, got {progress}"
            )));
        }
        if !(0.0..=1.0).contains(&progress) {
            debug!(progress, "morph progress outside [0, 1]");
        }

        let method = self.resolved_method(method);
        let key = MorphKey::new(method, progress);
        if let Some(path) = self.cache.get(key) {
            return Ok(path);
        }
        let path = self.compute(progress, method);
        self.cache.insert(key, path.clone());
        Ok(path)
    }

    /// Dynamic-input entry point: anything but a JSON number is a type error.
    pub fn morph_value(&mut self, progress: &serde_json::Value) -> Result<Path, AnimationError> {
        match progress.as_f64() {
            Some(p) => self.morph(p),
            None => Err(AnimationError::type_error(format!(
                "progress must be a number, got {}",
                json_type_name(progress)
            ))),
        }
    }

    fn compute(&self, progress: f64, method: MorphMethod) -> Path {
        if progress == 0.0 {
            return self.start.clone();
        }
        if progress == 1.0 {
            return self.end.clone();
        }
        match method {
            MorphMethod::Shape => strategy::shape(&self.start, &self.end, progress, self.sample_count),
            _ => strategy::stroke(&self.start, &self.end, progress, self.sample_count),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop cached results but keep counters.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Release the cache. Calling it again is a no-op. A disposed morpher
    /// still answers queries, starting from an empty cache.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        debug!(cached = self.cache.len(), "disposing morpher");
        self.cache.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for Morpher {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Morpher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.cache.stats();
        f.debug_struct("Morpher")
            .field("method", &self.method)
            .field("cache_size", &stats.size)
            .field("max_cache_size", &stats.max_size)
            .finish()
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
