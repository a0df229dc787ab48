use serde::{Deserialize, Serialize};

use crate::blend::FieldBlender;
use crate::schema::Field;
use crate::state::Appearance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextState {
    appearance: Appearance,
    text: String,
    font_size: f64,
    font_family: String,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            appearance: Appearance::default(),
            text: String::new(),
            font_size: 16.0,
            font_family: "Arial".to_string(),
        }
    }
}

impl TextState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn with_appearance(self, appearance: Appearance) -> Self {
        Self { appearance, ..self }
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self
        }
    }

    pub fn with_font_size(self, font_size: f64) -> Self {
        Self { font_size, ..self }
    }

    pub fn with_font_family(self, font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
            ..self
        }
    }

    pub(crate) fn blend(&self, other: &Self, b: &FieldBlender<'_, '_>) -> Self {
        Self {
            appearance: self.appearance.blend(&other.appearance, b),
            text: b.step(Field::Text, &self.text, &other.text),
            font_size: b.number(Field::FontSize, self.font_size, other.font_size),
            font_family: b.step(Field::FontFamily, &self.font_family, &other.font_family),
        }
    }
}
