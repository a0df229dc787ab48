//! Color value type.
//!
//! Colors are 8-bit RGB triples plus a `None` sentinel meaning "no paint".
//! Blending a real color with `None` is a step at progress 0.5; real colors
//! blend channel-wise in the requested [`ColorSpace`].

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AnimationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    #[default]
    Rgb,
    /// Hue takes the shorter way around the color wheel.
    Hsv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    None,
    Rgb {
        r: u8,
        g: u8,
        b: u8,
    },
}

const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("pink", (255, 192, 203)),
    ("brown", (165, 42, 42)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
];

impl Color {
    pub const NONE: Color = Color::None;

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Color::None)
    }

    pub fn to_tuple(&self) -> Option<(u8, u8, u8)> {
        match *self {
            Color::None => None,
            Color::Rgb { r, g, b } => Some((r, g, b)),
        }
    }

    /// `#RRGGBB`, or `none` for the sentinel.
    pub fn to_hex(&self) -> String {
        match *self {
            Color::None => "none".to_string(),
            Color::Rgb { r, g, b } => format!("#{r:02X}{g:02X}{b:02X}"),
        }
    }

    /// CSS `rgb(r,g,b)`, or `none` for the sentinel.
    pub fn to_rgb_string(&self) -> String {
        match *self {
            Color::None => "none".to_string(),
            Color::Rgb { r, g, b } => format!("rgb({r},{g},{b})"),
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, AnimationError> {
        let digits = hex.trim().trim_start_matches('#');
        let bad = || AnimationError::invalid_parameter("color", format!("invalid hex color '{hex}'"));
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| bad());
        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..=i].repeat(2));
                Ok(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Color::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(bad()),
        }
    }

    pub fn from_name(name: &str) -> Result<Self, AnimationError> {
        let key = name.trim().to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == key)
            .map(|&(_, (r, g, b))| Color::rgb(r, g, b))
            .ok_or_else(|| AnimationError::invalid_parameter("color", format!("unknown color name '{name}'")))
    }

    /// Blend towards `other`. Channels round to the nearest integer and clamp
    /// to `0..=255`, so overshooting progress saturates instead of wrapping.
    pub fn interpolate(&self, other: &Color, t: f64, space: ColorSpace) -> Color {
        let (a, b) = match (self.to_tuple(), other.to_tuple()) {
            (Some(a), Some(b)) => (a, b),
            _ => return if t < 0.5 { *self } else { *other },
        };
        if a == b {
            return *self;
        }
        match space {
            ColorSpace::Rgb => Color::rgb(
                lerp_channel(a.0, b.0, t),
                lerp_channel(a.1, b.1, t),
                lerp_channel(a.2, b.2, t),
            ),
            ColorSpace::Hsv => {
                let (mut h1, s1, v1) = rgb_to_hsv(a);
                let (mut h2, s2, v2) = rgb_to_hsv(b);
                if (h2 - h1).abs() > 180.0 {
                    if h2 > h1 {
                        h1 += 360.0;
                    } else {
                        h2 += 360.0;
                    }
                }
                let h = (h1 + (h2 - h1) * t).rem_euclid(360.0);
                let s = s1 + (s2 - s1) * t;
                let v = v1 + (v2 - v1) * t;
                let (r, g, b) = hsv_to_rgb(h, s, v);
                Color::rgb(r, g, b)
            }
        }
    }

    pub fn darken(&self, amount: u8) -> Color {
        self.map_channels(|c| c.saturating_sub(amount))
    }

    pub fn lighten(&self, amount: u8) -> Color {
        self.map_channels(|c| c.saturating_add(amount))
    }

    fn map_channels(&self, f: impl Fn(u8) -> u8) -> Color {
        match *self {
            Color::None => Color::None,
            Color::Rgb { r, g, b } => Color::rgb(f(r), f(g), f(b)),
        }
    }
}

#[inline]
fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[inline]
fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let a = f64::from(a);
    to_channel(a + (f64::from(b) - a) * t)
}

/// RGB to (hue degrees, saturation 0..1, value 0..1).
fn rgb_to_hsv((r, g, b): (u8, u8, u8)) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if max == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let s = delta / max;
    if delta == 0.0 {
        return (0.0, s, max);
    }
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    (h * 60.0, s, max)
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let c = v * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    (to_channel((r + m) * 255.0), to_channel((g + m) * 255.0), to_channel((b + m) * 255.0))
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = AnimationError;

    /// Accepts `none`/`transparent`, `#RGB`, `#RRGGBB`, `rgb(r,g,b)` and a
    /// small table of CSS names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower == "none" || lower == "transparent" {
            return Ok(Color::None);
        }
        if trimmed.starts_with('#') {
            return Color::from_hex(trimmed);
        }
        if let Some(inner) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            let parts = inner
                .split(',')
                .map(|p| p.trim().parse::<u8>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| AnimationError::invalid_parameter("color", format!("invalid rgb() color '{s}': {e}")))?;
            if let [r, g, b] = parts[..] {
                return Ok(Color::rgb(r, g, b));
            }
            return Err(AnimationError::invalid_parameter(
                "color",
                format!("rgb() needs three channels, got '{s}'"),
            ));
        }
        Color::from_name(trimmed)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
