//! Field schema and easing resolution.
//!
//! Every animatable attribute is named by [`Field`]. Which easing applies to
//! a field is resolved in priority order:
//!
//! 1. the segment override attached to the keyframe that starts the segment,
//! 2. the track-level property map,
//! 3. the variant default table ([`variant_default`]),
//! 4. the library default from [`AnimationConfig`](crate::AnimationConfig).

use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::AnimationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    Circle,
    Rectangle,
    Shape,
    Path,
    Text,
}

impl StateKind {
    pub fn name(&self) -> &'static str {
        match self {
            StateKind::Circle => "circle",
            StateKind::Rectangle => "rectangle",
            StateKind::Shape => "shape",
            StateKind::Path => "path",
            StateKind::Text => "text",
        }
    }

    /// Fields carried by this kind, appearance fields first.
    pub fn fields(&self) -> Vec<Field> {
        let own: &[Field] = match self {
            StateKind::Circle => &[Field::Radius],
            StateKind::Rectangle => &[Field::Width, Field::Height, Field::CornerRadius],
            StateKind::Shape => &[Field::Shape, Field::NumVertices, Field::Closed],
            StateKind::Path => &[Field::Data, Field::MorphMethod, Field::DashArray, Field::LineCap],
            StateKind::Text => &[Field::Text, Field::FontSize, Field::FontFamily],
        };
        Field::APPEARANCE.iter().chain(own).copied().collect()
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    X,
    Y,
    Scale,
    Rotation,
    Opacity,
    FillColor,
    StrokeColor,
    StrokeWidth,
    FillGradient,
    Radius,
    Width,
    Height,
    CornerRadius,
    Shape,
    NumVertices,
    Closed,
    Data,
    MorphMethod,
    DashArray,
    LineCap,
    Text,
    FontSize,
    FontFamily,
}

impl Field {
    pub const APPEARANCE: [Field; 9] = [
        Field::X,
        Field::Y,
        Field::Scale,
        Field::Rotation,
        Field::Opacity,
        Field::FillColor,
        Field::StrokeColor,
        Field::StrokeWidth,
        Field::FillGradient,
    ];

    pub const ALL: [Field; 23] = [
        Field::X,
        Field::Y,
        Field::Scale,
        Field::Rotation,
        Field::Opacity,
        Field::FillColor,
        Field::StrokeColor,
        Field::StrokeWidth,
        Field::FillGradient,
        Field::Radius,
        Field::Width,
        Field::Height,
        Field::CornerRadius,
        Field::Shape,
        Field::NumVertices,
        Field::Closed,
        Field::Data,
        Field::MorphMethod,
        Field::DashArray,
        Field::LineCap,
        Field::Text,
        Field::FontSize,
        Field::FontFamily,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::X => "x",
            Field::Y => "y",
            Field::Scale => "scale",
            Field::Rotation => "rotation",
            Field::Opacity => "opacity",
            Field::FillColor => "fill_color",
            Field::StrokeColor => "stroke_color",
            Field::StrokeWidth => "stroke_width",
            Field::FillGradient => "fill_gradient",
            Field::Radius => "radius",
            Field::Width => "width",
            Field::Height => "height",
            Field::CornerRadius => "corner_radius",
            Field::Shape => "shape",
            Field::NumVertices => "num_vertices",
            Field::Closed => "closed",
            Field::Data => "data",
            Field::MorphMethod => "morph_method",
            Field::DashArray => "dash_array",
            Field::LineCap => "line_cap",
            Field::Text => "text",
            Field::FontSize => "font_size",
            Field::FontFamily => "font_family",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| AnimationError::invalid_parameter("field", format!("unknown field '{s}'")))
    }
}

/// Per-variant default easing. `None` defers to the library default.
pub const fn variant_default(kind: StateKind, field: Field) -> Option<Easing> {
    use Field::*;
    match (kind, field) {
        (_, X | Y | Scale | Rotation | StrokeWidth) => Some(Easing::InOut),
        (_, Opacity | FillColor | StrokeColor) => Some(Easing::Linear),
        (StateKind::Circle, Radius) => Some(Easing::InOut),
        (StateKind::Rectangle, Width | Height | CornerRadius) => Some(Easing::InOut),
        (StateKind::Shape, Shape) => Some(Easing::InOut),
        (StateKind::Shape, NumVertices | Closed) => Some(Easing::Step),
        (StateKind::Path, MorphMethod | DashArray | LineCap) => Some(Easing::Step),
        (StateKind::Text, Text | FontFamily) => Some(Easing::Step),
        (StateKind::Text, FontSize) => Some(Easing::InOut),
        _ => None,
    }
}

/// Field-to-easing registry used for track-level and per-segment overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EasingMap {
    entries: HashMap<Field, Easing>,
}

impl EasingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from string keys, rejecting names that are not fields.
    pub fn from_names<'a, I>(pairs: I) -> Result<Self, AnimationError>
    where
        I: IntoIterator<Item = (&'a str, Easing)>,
    {
        let mut map = Self::new();
        for (name, easing) in pairs {
            map.set(name.parse()?, easing);
        }
        Ok(map)
    }

    pub fn with(mut self, field: Field, easing: Easing) -> Self {
        self.set(field, easing);
        self
    }

    pub fn set(&mut self, field: Field, easing: Easing) {
        self.entries.insert(field, easing);
    }

    pub fn get(&self, field: Field) -> Option<Easing> {
        self.entries.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves the easing for each field of one segment.
#[derive(Debug, Clone, Copy)]
pub struct EasingResolver<'a> {
    kind: StateKind,
    segment: Option<&'a EasingMap>,
    property: Option<&'a EasingMap>,
    fallback: Easing,
}

impl<'a> EasingResolver<'a> {
    pub fn new(kind: StateKind, fallback: Easing) -> Self {
        Self {
            kind,
            segment: None,
            property: None,
            fallback,
        }
    }

    pub fn with_segment(mut self, segment: &'a EasingMap) -> Self {
        self.segment = Some(segment);
        self
    }

    pub fn with_property(mut self, property: &'a EasingMap) -> Self {
        self.property = Some(property);
        self
    }

    pub fn kind(&self) -> StateKind {
        self.kind
    }

    pub fn resolve(&self, field: Field) -> Easing {
        self.segment
            .and_then(|m| m.get(field))
            .or_else(|| self.property.and_then(|m| m.get(field)))
            .or_else(|| variant_default(self.kind, field))
            .unwrap_or(self.fallback)
    }
}
