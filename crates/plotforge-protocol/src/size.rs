use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A length on the wire, in one of two unit systems.
///
/// World-unit sizes are plain numbers. Pixel-unit sizes are strings with an
/// optional `px` suffix (`"4px"`, `"4"`); they can only be resolved to world
/// units once the renderer knows its pixel-to-world factor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Size {
    World(f32),
    Pixels(f32),
}

impl Size {
    /// True for pixel-unit sizes, which need a resolved scale to convert.
    #[inline]
    pub fn is_pixels(self) -> bool {
        matches!(self, Size::Pixels(_))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::World(v) => write!(f, "{v}"),
            Size::Pixels(v) => write!(f, "{v}px"),
        }
    }
}

impl Serialize for Size {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Size::World(v) => serializer.serialize_f32(v),
            Size::Pixels(v) => serializer.serialize_str(&format!("{v}px")),
        }
    }
}

impl<'de> Deserialize<'de> for Size {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Ok(Size::World(v)),
            Raw::Text(s) => {
                let trimmed = s.trim();
                let digits = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
                digits
                    .parse::<f32>()
                    .map(Size::Pixels)
                    .map_err(|_| de::Error::custom(format!("invalid pixel size {s:?}")))
            }
        }
    }
}
