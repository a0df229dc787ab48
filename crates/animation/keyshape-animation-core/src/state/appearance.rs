use serde::{Deserialize, Serialize};

use crate::blend::FieldBlender;
use crate::color::Color;
use crate::gradient::Gradient;
use crate::schema::Field;

/// Placement and paint shared by every state variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    x: f64,
    y: f64,
    scale: f64,
    /// Degrees, blended along the shortest arc
    rotation: f64,
    /// Not clamped; out-of-range values are the renderer's concern
    opacity: f64,
    fill_color: Color,
    stroke_color: Color,
    stroke_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill_gradient: Option<Gradient>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
            fill_color: Color::None,
            stroke_color: Color::None,
            stroke_width: 1.0,
            fill_gradient: None,
        }
    }
}

impl Appearance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn fill_gradient(&self) -> Option<&Gradient> {
        self.fill_gradient.as_ref()
    }

    pub fn with_position(self, x: f64, y: f64) -> Self {
        Self { x, y, ..self }
    }

    pub fn with_x(self, x: f64) -> Self {
        Self { x, ..self }
    }

    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    pub fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_opacity(self, opacity: f64) -> Self {
        Self { opacity, ..self }
    }

    pub fn with_fill_color(self, fill_color: Color) -> Self {
        Self { fill_color, ..self }
    }

    pub fn with_stroke_color(self, stroke_color: Color) -> Self {
        Self { stroke_color, ..self }
    }

    pub fn with_stroke_width(self, stroke_width: f64) -> Self {
        Self { stroke_width, ..self }
    }

    pub fn with_fill_gradient(self, fill_gradient: Option<Gradient>) -> Self {
        Self { fill_gradient, ..self }
    }

    pub(crate) fn blend(&self, other: &Appearance, b: &FieldBlender<'_, '_>) -> Appearance {
        if self == other {
            return self.clone();
        }
        Appearance {
            x: b.number(Field::X, self.x, other.x),
            y: b.number(Field::Y, self.y, other.y),
            scale: b.number(Field::Scale, self.scale, other.scale),
            rotation: b.angle(Field::Rotation, self.rotation, other.rotation),
            opacity: b.number(Field::Opacity, self.opacity, other.opacity),
            fill_color: b.color(Field::FillColor, &self.fill_color, &other.fill_color),
            stroke_color: b.color(Field::StrokeColor, &self.stroke_color, &other.stroke_color),
            stroke_width: b.number(Field::StrokeWidth, self.stroke_width, other.stroke_width),
            fill_gradient: b.gradient(Field::FillGradient, &self.fill_gradient, &other.fill_gradient),
        }
    }
}
