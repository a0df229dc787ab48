//! Linear and radial gradient fills.

use keyshape_path_core::Point;
use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorSpace};
use crate::error::AnimationError;

pub const MIN_STOPS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }

    fn lerp(&self, other: &GradientStop, t: f64, space: ColorSpace) -> GradientStop {
        GradientStop {
            offset: self.offset + (other.offset - self.offset) * t,
            color: self.color.interpolate(&other.color, t, space),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GradientKind {
    Linear { start: Point, end: Point },
    Radial { center: Point, radius: f64 },
}

impl GradientKind {
    pub fn name(&self) -> &'static str {
        match self {
            GradientKind::Linear { .. } => "linear",
            GradientKind::Radial { .. } => "radial",
        }
    }

    fn lerp(&self, other: &GradientKind, t: f64) -> Option<GradientKind> {
        match (*self, *other) {
            (
                GradientKind::Linear { start: s0, end: e0 },
                GradientKind::Linear { start: s1, end: e1 },
            ) => Some(GradientKind::Linear {
                start: s0.lerp(s1, t),
                end: e0.lerp(e1, t),
            }),
            (
                GradientKind::Radial { center: c0, radius: r0 },
                GradientKind::Radial { center: c1, radius: r1 },
            ) => Some(GradientKind::Radial {
                center: c0.lerp(c1, t),
                radius: r0 + (r1 - r0) * t,
            }),
            _ => None,
        }
    }
}

/// A validated gradient. Always has at least [`MIN_STOPS`] stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GradientRepr", into = "GradientRepr")]
pub struct Gradient {
    kind: GradientKind,
    stops: Vec<GradientStop>,
}

#[derive(Serialize, Deserialize)]
struct GradientRepr {
    #[serde(flatten)]
    kind: GradientKind,
    stops: Vec<GradientStop>,
}

impl TryFrom<GradientRepr> for Gradient {
    type Error = AnimationError;

    fn try_from(repr: GradientRepr) -> Result<Self, Self::Error> {
        Gradient::new(repr.kind, repr.stops)
    }
}

impl From<Gradient> for GradientRepr {
    fn from(g: Gradient) -> Self {
        GradientRepr {
            kind: g.kind,
            stops: g.stops,
        }
    }
}

impl Gradient {
    pub fn new(kind: GradientKind, stops: Vec<GradientStop>) -> Result<Self, AnimationError> {
        if stops.len() < MIN_STOPS {
            return Err(AnimationError::invalid_parameter(
                "stops",
                format!("{} gradient needs at least {MIN_STOPS} stops, got {}", kind.name(), stops.len()),
            ));
        }
        if let Some(bad) = stops.iter().find(|s| !(0.0..=1.0).contains(&s.offset)) {
            return Err(AnimationError::invalid_parameter(
                "stops",
                format!("stop offset must lie in [0, 1], got {}", bad.offset),
            ));
        }
        if let GradientKind::Radial { radius, .. } = kind {
            if !radius.is_finite() || radius < 0.0 {
                return Err(AnimationError::invalid_parameter(
                    "radius",
                    format!("radial gradient radius must be finite and non-negative, got {radius}"),
                ));
            }
        }
        Ok(Self { kind, stops })
    }

    pub fn linear(start: Point, end: Point, stops: Vec<GradientStop>) -> Result<Self, AnimationError> {
        Self::new(GradientKind::Linear { start, end }, stops)
    }

    pub fn radial(center: Point, radius: f64, stops: Vec<GradientStop>) -> Result<Self, AnimationError> {
        Self::new(GradientKind::Radial { center, radius }, stops)
    }

    pub fn kind(&self) -> &GradientKind {
        &self.kind
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Sub-field blend when both sides share a kind and stop count, step at
    /// 0.5 otherwise. `t` is already eased.
    pub fn blend(&self, other: &Gradient, t: f64, space: ColorSpace) -> Gradient {
        if self == other || t == 0.0 {
            return self.clone();
        }
        if t == 1.0 {
            return other.clone();
        }
        let kind = match self.kind.lerp(&other.kind, t) {
            Some(kind) if self.stops.len() == other.stops.len() => kind,
            _ => return if t < 0.5 { self.clone() } else { other.clone() },
        };
        let stops = self
            .stops
            .iter()
            .zip(&other.stops)
            .map(|(a, b)| a.lerp(b, t, space))
            .collect();
        // Interpolated offsets may overshoot [0, 1]; only construction validates.
        Gradient { kind, stops }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn two_stop() -> Vec<GradientStop> {
        vec![
            GradientStop::new(0.0, Color::rgb(255, 0, 0)),
            GradientStop::new(1.0, Color::rgb(0, 0, 255)),
        ]
    }

    #[test]
    fn too_few_stops_rejected() {
        let err = Gradient::linear(Point::ORIGIN, Point::new(1.0, 0.0), vec![GradientStop::new(0.0, Color::None)])
            .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidParameter { ref field, .. } if field == "stops"));
    }

    #[test]
    fn same_kind_blends_sub_fields() {
        let a = Gradient::radial(Point::ORIGIN, 10.0, two_stop()).unwrap();
        let b = Gradient::radial(Point::new(10.0, 0.0), 20.0, two_stop()).unwrap();
        let mid = a.blend(&b, 0.5, ColorSpace::Rgb);
        match *mid.kind() {
            GradientKind::Radial { center, radius } => {
                assert_abs_diff_eq!(center.x, 5.0);
                assert_abs_diff_eq!(radius, 15.0);
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn mismatched_kind_steps() {
        let a = Gradient::radial(Point::ORIGIN, 10.0, two_stop()).unwrap();
        let b = Gradient::linear(Point::ORIGIN, Point::new(1.0, 1.0), two_stop()).unwrap();
        assert_eq!(a.blend(&b, 0.49, ColorSpace::Rgb), a);
        assert_eq!(a.blend(&b, 0.51, ColorSpace::Rgb), b);
    }

    #[test]
    fn mismatched_stop_count_steps() {
        let a = Gradient::linear(Point::ORIGIN, Point::new(1.0, 0.0), two_stop()).unwrap();
        let mut stops = two_stop();
        stops.push(GradientStop::new(0.5, Color::rgb(0, 255, 0)));
        let b = Gradient::linear(Point::ORIGIN, Point::new(1.0, 0.0), stops).unwrap();
        assert_eq!(a.blend(&b, 0.3, ColorSpace::Rgb), a);
        assert_eq!(a.blend(&b, 0.7, ColorSpace::Rgb), b);
    }

    #[test]
    fn serde_validates() {
        let ok = r##"{"type":"linear","start":{"x":0,"y":0},"end":{"x":1,"y":0},
            "stops":[{"offset":0,"color":"#FF0000"},{"offset":1,"color":"none"}]}"##;
        let g: Gradient = serde_json::from_str(ok).unwrap();
        assert_eq!(g.stops().len(), 2);

        let bad = r##"{"type":"radial","center":{"x":0,"y":0},"radius":3,
            "stops":[{"offset":0,"color":"#FF0000"}]}"##;
        assert!(serde_json::from_str::<Gradient>(bad).is_err());
    }
}
