use keyshape_path_core::{Path, PathCommand};
use serde::{Deserialize, Serialize};

use crate::blend::FieldBlender;
use crate::error::AnimationError;
use crate::morph::MorphMethod;
use crate::schema::Field;
use crate::state::Appearance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Free-form outline whose geometry morphs between keyframes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathState {
    appearance: Appearance,
    data: Path,
    morph_method: MorphMethod,
    /// Dash pattern in renderer syntax, e.g. `"4 2"`. Stepped, never blended.
    #[serde(skip_serializing_if = "Option::is_none")]
    dash_array: Option<String>,
    line_cap: LineCap,
}

impl Default for PathState {
    fn default() -> Self {
        Self {
            appearance: Appearance::default(),
            data: Path::new(vec![
                PathCommand::move_to(0.0, 0.0),
                PathCommand::line_to(10.0, 10.0),
                PathCommand::line_to(0.0, 20.0),
                PathCommand::close(),
            ]),
            morph_method: MorphMethod::Auto,
            dash_array: None,
            line_cap: LineCap::Butt,
        }
    }
}

impl PathState {
    pub fn new(data: Path) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Parse `data` from the path mini-language.
    pub fn parse(data: &str) -> Result<Self, AnimationError> {
        Ok(Self::new(Path::parse(data)?))
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn data(&self) -> &Path {
        &self.data
    }

    pub fn morph_method(&self) -> MorphMethod {
        self.morph_method
    }

    pub fn dash_array(&self) -> Option<&str> {
        self.dash_array.as_deref()
    }

    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    pub fn with_appearance(self, appearance: Appearance) -> Self {
        Self { appearance, ..self }
    }

    pub fn with_data(self, data: Path) -> Self {
        Self { data, ..self }
    }

    pub fn with_morph_method(self, morph_method: MorphMethod) -> Self {
        Self { morph_method, ..self }
    }

    pub fn with_dash_array(self, dash_array: Option<String>) -> Self {
        Self { dash_array, ..self }
    }

    pub fn with_line_cap(self, line_cap: LineCap) -> Self {
        Self { line_cap, ..self }
    }

    /// The start state's morph method drives the geometry blend.
    pub(crate) fn blend(&self, other: &Self, b: &mut FieldBlender<'_, '_>) -> Result<Self, AnimationError> {
        Ok(Self {
            appearance: self.appearance.blend(&other.appearance, b),
            data: b.path(Field::Data, &self.data, &other.data, self.morph_method)?,
            morph_method: b.step(Field::MorphMethod, &self.morph_method, &other.morph_method),
            dash_array: b.step(Field::DashArray, &self.dash_array, &other.dash_array),
            line_cap: b.step(Field::LineCap, &self.line_cap, &other.line_cap),
        })
    }
}
