//! Field-level blend rules.
//!
//! [`FieldBlender`] carries the eased-progress context for one blend call.
//! Each helper resolves the field's easing, applies it to the raw progress
//! and combines the two endpoint values. Eased progress of exactly 0 or 1
//! always yields the matching endpoint unchanged.

use keyshape_path_core::{Path, Point};

use crate::color::{Color, ColorSpace};
use crate::config::AnimationConfig;
use crate::error::AnimationError;
use crate::gradient::Gradient;
use crate::morph::{MorphMethod, Morpher};
use crate::schema::{EasingMap, EasingResolver, Field, StateKind};

/// Caller-supplied context for [`State::blend_with`](crate::State::blend_with).
#[derive(Debug, Clone, Copy)]
pub struct BlendOptions<'a> {
    pub config: &'a AnimationConfig,
    pub segment_easing: Option<&'a EasingMap>,
    pub property_easing: Option<&'a EasingMap>,
}

impl<'a> BlendOptions<'a> {
    pub fn new(config: &'a AnimationConfig) -> Self {
        Self {
            config,
            segment_easing: None,
            property_easing: None,
        }
    }

    pub fn with_segment_easing(mut self, easing: &'a EasingMap) -> Self {
        self.segment_easing = Some(easing);
        self
    }

    pub fn with_property_easing(mut self, easing: &'a EasingMap) -> Self {
        self.property_easing = Some(easing);
        self
    }

    pub(crate) fn resolver(&self, kind: StateKind) -> EasingResolver<'a> {
        let mut resolver = EasingResolver::new(kind, self.config.default_easing);
        if let Some(segment) = self.segment_easing {
            resolver = resolver.with_segment(segment);
        }
        if let Some(property) = self.property_easing {
            resolver = resolver.with_property(property);
        }
        resolver
    }
}

/// Linear interpolation that returns the endpoints exactly at 0 and 1.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

#[inline]
pub fn step<T: Clone>(a: &T, b: &T, t: f64) -> T {
    if t < 0.5 {
        a.clone()
    } else {
        b.clone()
    }
}

/// Shortest-arc interpolation in degrees. Intermediate results start from
/// `a` normalized to `[0, 360)` and are not wrapped, so a turn through 0
/// continues below it (`10 -> 350` passes `-5`).
pub fn lerp_angle(a: f64, b: f64, t: f64) -> f64 {
    if t == 0.0 || a == b {
        return a;
    }
    if t == 1.0 {
        return b;
    }
    let from = a.rem_euclid(360.0);
    let mut diff = b.rem_euclid(360.0) - from;
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff < -180.0 {
        diff += 360.0;
    }
    from + diff * t
}

pub(crate) struct FieldBlender<'a, 'm> {
    resolver: EasingResolver<'a>,
    progress: f64,
    config: &'a AnimationConfig,
    morpher: Option<&'m mut Morpher>,
}

impl<'a, 'm> FieldBlender<'a, 'm> {
    pub(crate) fn new(kind: StateKind, progress: f64, options: &BlendOptions<'a>) -> Self {
        Self {
            resolver: options.resolver(kind),
            progress,
            config: options.config,
            morpher: None,
        }
    }

    /// Serve path fields from `morpher` instead of a throwaway one.
    pub(crate) fn with_morpher(mut self, morpher: &'m mut Morpher) -> Self {
        self.morpher = Some(morpher);
        self
    }

    pub(crate) fn eased(&self, field: Field) -> f64 {
        self.resolver.resolve(field).apply(self.progress)
    }

    pub(crate) fn color_space(&self) -> ColorSpace {
        self.config.color_space
    }

    pub(crate) fn number(&self, field: Field, a: f64, b: f64) -> f64 {
        if a == b {
            return a;
        }
        lerp(a, b, self.eased(field))
    }

    pub(crate) fn angle(&self, field: Field, a: f64, b: f64) -> f64 {
        lerp_angle(a, b, self.eased(field))
    }

    pub(crate) fn point(&self, field: Field, a: Point, b: Point) -> Point {
        let t = self.eased(field);
        Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
    }

    /// Rounded lerp for integer counts; never drops below zero.
    pub(crate) fn count(&self, field: Field, a: usize, b: usize) -> usize {
        if a == b {
            return a;
        }
        lerp(a as f64, b as f64, self.eased(field)).round().max(0.0) as usize
    }

    pub(crate) fn color(&self, field: Field, a: &Color, b: &Color) -> Color {
        a.interpolate(b, self.eased(field), self.color_space())
    }

    pub(crate) fn step<T: Clone + PartialEq>(&self, field: Field, a: &T, b: &T) -> T {
        if a == b {
            return a.clone();
        }
        step(a, b, self.eased(field))
    }

    /// Both present: blend with `f`. One side missing: step, with `None`
    /// as a regular endpoint.
    pub(crate) fn optional<T, F>(&self, field: Field, a: &Option<T>, b: &Option<T>, f: F) -> Option<T>
    where
        T: Clone,
        F: FnOnce(&T, &T, f64) -> T,
    {
        let t = self.eased(field);
        match (a, b) {
            (Some(x), Some(y)) => Some(f(x, y, t)),
            _ => step(a, b, t),
        }
    }

    pub(crate) fn gradient(&self, field: Field, a: &Option<Gradient>, b: &Option<Gradient>) -> Option<Gradient> {
        let space = self.color_space();
        self.optional(field, a, b, |x, y, t| x.blend(y, t, space))
    }

    /// Path fields go through the morph engine using `method`.
    pub(crate) fn path(&mut self, field: Field, a: &Path, b: &Path, method: MorphMethod) -> Result<Path, AnimationError> {
        if a == b {
            return Ok(a.clone());
        }
        let t = self.eased(field);
        if t == 0.0 {
            return Ok(a.clone());
        }
        if t == 1.0 {
            return Ok(b.clone());
        }
        match self.morpher.as_deref_mut() {
            Some(morpher) => morpher.morph_with(t, method),
            None => Morpher::with_config(a.clone(), b.clone(), self.config)
                .with_method(method)
                .morph(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use approx::assert_abs_diff_eq;

    #[test]
    fn lerp_hits_endpoints_exactly() {
        assert_eq!(lerp(0.1, 0.7, 1.0), 0.7);
        assert_eq!(lerp(0.1, 0.7, 0.0), 0.1);
        assert_abs_diff_eq!(lerp(10.0, 20.0, 0.25), 12.5);
        assert_abs_diff_eq!(lerp(0.0, 10.0, 1.5), 15.0);
    }

    #[test]
    fn angle_takes_shortest_arc() {
        assert_abs_diff_eq!(lerp_angle(350.0, 10.0, 0.5), 360.0);
        assert_abs_diff_eq!(lerp_angle(10.0, 350.0, 0.25), 5.0);
        assert_abs_diff_eq!(lerp_angle(10.0, 350.0, 0.75), -5.0);
        assert_abs_diff_eq!(lerp_angle(-30.0, 0.0, 0.5), 345.0);
        assert_abs_diff_eq!(lerp_angle(0.0, 90.0, 0.5), 45.0);
        assert_eq!(lerp_angle(350.0, 370.0, 1.0), 370.0);
    }

    #[test]
    fn step_threshold() {
        assert_eq!(step(&"a", &"b", 0.49), "a");
        assert_eq!(step(&"a", &"b", 0.5), "b");
    }

    #[test]
    fn numbers_use_resolved_easing() {
        let config = AnimationConfig::default();
        let property = EasingMap::new().with(Field::Radius, Easing::Linear);
        let options = BlendOptions::new(&config).with_property_easing(&property);
        let blender = FieldBlender::new(StateKind::Circle, 0.25, &options);
        assert_abs_diff_eq!(blender.number(Field::Radius, 0.0, 100.0), 25.0);
        // x keeps the variant default (in_out)
        assert_abs_diff_eq!(blender.number(Field::X, 0.0, 100.0), 15.625);
    }

    #[test]
    fn optional_one_sided_steps() {
        let config = AnimationConfig::default();
        let options = BlendOptions::new(&config);
        let early = FieldBlender::new(StateKind::Circle, 0.2, &options);
        let late = FieldBlender::new(StateKind::Circle, 0.8, &options);
        let a = Some(1.0);
        let b: Option<f64> = None;
        assert_eq!(early.optional(Field::Opacity, &a, &b, |x, y, t| lerp(*x, *y, t)), Some(1.0));
        assert_eq!(late.optional(Field::Opacity, &a, &b, |x, y, t| lerp(*x, *y, t)), None);
    }
}
