//! Keyshape animation core.
//!
//! Renderer-agnostic keyframe interpolation: an easing library, per-field
//! blend rules for immutable [`State`] snapshots, a cached shape
//! [`Morpher`] for path geometry, and a [`KeyframeTrack`] that ties them
//! together.
//!
//! ```
//! use keyshape_animation_core::{AnimationConfig, Appearance, CircleState, KeyframeTrack};
//!
//! let mut track = KeyframeTrack::new(AnimationConfig::default()).unwrap();
//! track.add_keyframe(0.0, CircleState::new(10.0)).unwrap();
//! track
//!     .add_keyframe(1.0, CircleState::new(20.0).with_appearance(Appearance::new().with_x(50.0)))
//!     .unwrap();
//! let mid = track.sample(0.5).unwrap();
//! assert_eq!(mid.appearance().x(), 25.0);
//! ```

pub mod blend;
pub mod color;
pub mod config;
pub mod easing;
pub mod error;
pub mod gradient;
pub mod morph;
pub mod schema;
pub mod state;
pub mod track;

pub use blend::{lerp, lerp_angle, step, BlendOptions};
pub use color::{Color, ColorSpace};
pub use config::AnimationConfig;
pub use easing::Easing;
pub use error::AnimationError;
pub use gradient::{Gradient, GradientKind, GradientStop};
pub use morph::{CacheStats, MorphMethod, Morpher};
pub use schema::{variant_default, EasingMap, EasingResolver, Field, StateKind};
pub use state::{Appearance, CircleState, LineCap, PathState, RectangleState, ShapeState, State, TextState};
pub use track::{Keyframe, KeyframeTrack};

pub use keyshape_contour_core::{ContourSet, Shape, ShapeParams};
pub use keyshape_path_core::{Path, Point};

pub type Result<T> = std::result::Result<T, AnimationError>;
