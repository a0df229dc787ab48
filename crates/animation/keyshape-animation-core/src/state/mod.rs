//! Immutable attribute snapshots and the blend entry points.
//!
//! A [`State`] is one variant per object kind. Two states blend field by
//! field when they share a variant. Mixed variants either fail
//! ([`State::blend`]) or step at progress 0.5 ([`State::blend_or_step`]).

mod appearance;
mod path;
mod shapes;
mod text;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blend::{BlendOptions, FieldBlender};
use crate::config::AnimationConfig;
use crate::error::AnimationError;
use crate::morph::Morpher;
use crate::schema::StateKind;

pub use appearance::Appearance;
pub use path::{LineCap, PathState};
pub use shapes::{CircleState, RectangleState, ShapeState};
pub use text::TextState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum State {
    Circle(CircleState),
    Rectangle(RectangleState),
    Shape(ShapeState),
    Path(PathState),
    Text(TextState),
}

impl State {
    pub fn kind(&self) -> StateKind {
        match self {
            State::Circle(_) => StateKind::Circle,
            State::Rectangle(_) => StateKind::Rectangle,
            State::Shape(_) => StateKind::Shape,
            State::Path(_) => StateKind::Path,
            State::Text(_) => StateKind::Text,
        }
    }

    pub fn appearance(&self) -> &Appearance {
        match self {
            State::Circle(s) => s.appearance(),
            State::Rectangle(s) => s.appearance(),
            State::Shape(s) => s.appearance(),
            State::Path(s) => s.appearance(),
            State::Text(s) => s.appearance(),
        }
    }

    pub fn with_appearance(self, appearance: Appearance) -> Self {
        match self {
            State::Circle(s) => State::Circle(s.with_appearance(appearance)),
            State::Rectangle(s) => State::Rectangle(s.with_appearance(appearance)),
            State::Shape(s) => State::Shape(s.with_appearance(appearance)),
            State::Path(s) => State::Path(s.with_appearance(appearance)),
            State::Text(s) => State::Text(s.with_appearance(appearance)),
        }
    }

    /// Blend with the default configuration and no easing overrides.
    pub fn blend(&self, other: &State, progress: f64) -> Result<State, AnimationError> {
        let config = AnimationConfig::default();
        self.blend_with(other, progress, &BlendOptions::new(&config))
    }

    pub fn blend_with(&self, other: &State, progress: f64, options: &BlendOptions<'_>) -> Result<State, AnimationError> {
        let mut blender = self.blender(other, progress, options)?;
        self.blend_fields(other, &mut blender)
    }

    /// As [`blend_with`](Self::blend_with), but mixed variants return the
    /// start state below progress 0.5 and the end state from 0.5 on.
    pub fn blend_or_step(&self, other: &State, progress: f64, options: &BlendOptions<'_>) -> Result<State, AnimationError> {
        match self.blend_with(other, progress, options) {
            Err(AnimationError::IncompatibleStateKind { expected, found }) => {
                debug!(%expected, %found, progress, "stepping between mixed state kinds");
                Ok(if progress < 0.5 { self.clone() } else { other.clone() })
            }
            result => result,
        }
    }

    /// Blend serving path fields from a caller-owned morpher.
    pub(crate) fn blend_with_morpher(
        &self,
        other: &State,
        progress: f64,
        options: &BlendOptions<'_>,
        morpher: &mut Morpher,
    ) -> Result<State, AnimationError> {
        let mut blender = self.blender(other, progress, options)?.with_morpher(morpher);
        self.blend_fields(other, &mut blender)
    }

    fn blender<'a, 'm>(
        &self,
        other: &State,
        progress: f64,
        options: &BlendOptions<'a>,
    ) -> Result<FieldBlender<'a, 'm>, AnimationError> {
        if !progress.is_finite() {
            return Err(AnimationError::type_error(format!(
                "blend progress must be a finite number, got {progress}"
            )));
        }
        if self.kind() != other.kind() {
            return Err(AnimationError::IncompatibleStateKind {
                expected: self.kind().to_string(),
                found: other.kind().to_string(),
            });
        }
        Ok(FieldBlender::new(self.kind(), progress, options))
    }

    fn blend_fields(&self, other: &State, b: &mut FieldBlender<'_, '_>) -> Result<State, AnimationError> {
        if self == other {
            return Ok(self.clone());
        }
        Ok(match (self, other) {
            (State::Circle(x), State::Circle(y)) => State::Circle(x.blend(y, b)),
            (State::Rectangle(x), State::Rectangle(y)) => State::Rectangle(x.blend(y, b)),
            (State::Shape(x), State::Shape(y)) => State::Shape(x.blend(y, b)),
            (State::Path(x), State::Path(y)) => State::Path(x.blend(y, b)?),
            (State::Text(x), State::Text(y)) => State::Text(x.blend(y, b)),
            _ => {
                return Err(AnimationError::IncompatibleStateKind {
                    expected: self.kind().to_string(),
                    found: other.kind().to_string(),
                })
            }
        })
    }
}

impl From<CircleState> for State {
    fn from(s: CircleState) -> Self {
        State::Circle(s)
    }
}

impl From<RectangleState> for State {
    fn from(s: RectangleState) -> Self {
        State::Rectangle(s)
    }
}

impl From<ShapeState> for State {
    fn from(s: ShapeState) -> Self {
        State::Shape(s)
    }
}

impl From<PathState> for State {
    fn from(s: PathState) -> Self {
        State::Path(s)
    }
}

impl From<TextState> for State {
    fn from(s: TextState) -> Self {
        State::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::easing::Easing;
    use crate::schema::{EasingMap, Field};
    use approx::assert_abs_diff_eq;
    use keyshape_contour_core::{Shape, ShapeParams};

    fn circle(radius: f64, x: f64) -> State {
        CircleState::new(radius)
            .with_appearance(Appearance::new().with_x(x))
            .into()
    }

    #[test]
    fn identity_blend_is_exact() {
        let a = circle(50.0, 0.0);
        assert_eq!(a.blend(&a.clone(), 0.5).unwrap(), a);
    }

    #[test]
    fn endpoints_are_identity() {
        let a: State = CircleState::new(10.0)
            .with_appearance(
                Appearance::new()
                    .with_position(0.1, 0.3)
                    .with_rotation(350.0)
                    .with_fill_color(Color::rgb(255, 0, 0)),
            )
            .into();
        let b: State = CircleState::new(70.7)
            .with_appearance(
                Appearance::new()
                    .with_position(0.7, -3.3)
                    .with_rotation(10.0)
                    .with_fill_color(Color::None),
            )
            .into();
        assert_eq!(a.blend(&b, 0.0).unwrap(), a);
        assert_eq!(a.blend(&b, 1.0).unwrap(), b);
    }

    #[test]
    fn mixed_kinds_error_or_step() {
        let a = circle(10.0, 0.0);
        let b: State = TextState::new("hi").into();
        let err = a.blend(&b, 0.5).unwrap_err();
        assert_eq!(
            err,
            AnimationError::IncompatibleStateKind {
                expected: "circle".into(),
                found: "text".into()
            }
        );

        let config = AnimationConfig::default();
        let options = BlendOptions::new(&config);
        assert_eq!(a.blend_or_step(&b, 0.49, &options).unwrap(), a);
        assert_eq!(a.blend_or_step(&b, 0.51, &options).unwrap(), b);
    }

    #[test]
    fn nan_progress_is_type_error() {
        let a = circle(10.0, 0.0);
        let err = a.blend(&circle(20.0, 0.0), f64::NAN).unwrap_err();
        assert!(matches!(err, AnimationError::TypeError { .. }));
    }

    #[test]
    fn linear_numeric_fields() {
        let config = AnimationConfig::default();
        let linear = EasingMap::new().with(Field::Radius, Easing::Linear).with(Field::X, Easing::Linear);
        let options = BlendOptions::new(&config).with_property_easing(&linear);
        let mid = circle(10.0, 0.0).blend_with(&circle(20.0, 100.0), 0.3, &options).unwrap();
        match mid {
            State::Circle(c) => {
                assert_abs_diff_eq!(c.radius(), 13.0, epsilon = 1e-12);
                assert_abs_diff_eq!(c.appearance().x(), 30.0, epsilon = 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn negative_values_are_preserved() {
        let config = AnimationConfig::default();
        let linear = EasingMap::new().with(Field::Radius, Easing::Linear);
        let options = BlendOptions::new(&config).with_property_easing(&linear);
        let out = circle(10.0, 0.0).blend_with(&circle(-10.0, 0.0), 0.75, &options).unwrap();
        let State::Circle(c) = out else { panic!("kind changed") };
        assert_abs_diff_eq!(c.radius(), -5.0);
    }

    #[test]
    fn shape_kinds_step_but_params_blend() {
        let star = |outer: f64| {
            State::from(ShapeState::new(
                ShapeParams::new(Shape::Star {
                    outer_radius: outer,
                    inner_radius: 10.0,
                    points: 5,
                })
                .with_num_vertices(40),
            ))
        };
        let mid = star(20.0).blend(&star(40.0), 0.5).unwrap();
        let State::Shape(s) = &mid else { panic!("kind changed") };
        match s.shape().shape {
            Shape::Star { outer_radius, .. } => assert_abs_diff_eq!(outer_radius, 30.0),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(s.contours().unwrap().outer().len(), 40);

        let ring = State::from(ShapeState::new(ShapeParams::new(Shape::Ring {
            inner_radius: 5.0,
            outer_radius: 10.0,
        })));
        let early = star(20.0).blend(&ring, 0.49).unwrap();
        let State::Shape(e) = early else { panic!("kind changed") };
        assert_eq!(e.shape().shape.name(), "star");
    }

    #[test]
    fn state_serde_is_kind_tagged() {
        let json = r##"{"kind":"circle","radius":5,"appearance":{"fill_color":"#00FF00"}}"##;
        let state: State = serde_json::from_str(json).unwrap();
        assert_eq!(state.kind(), StateKind::Circle);
        assert_eq!(state.appearance().fill_color(), Color::rgb(0, 255, 0));
        assert_eq!(state.appearance().scale(), 1.0);
        let back = serde_json::to_value(&state).unwrap();
        assert_eq!(back["kind"], "circle");
    }
}
