use plotforge_protocol::{Primitive, Size};

use crate::coords::Vec2;
use crate::error::CompileError;
use crate::paint::Rgba;

pub(crate) const DEFAULT_FONT: &str = "Arial";

/// Single-line text anchored at a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub position: Vec2,
    pub font: String,
    pub size: Size,
    pub color: Rgba,
}

impl Text {
    pub(crate) fn from_wire(primitive: &Primitive) -> Result<Self, CompileError> {
        let Primitive::Text { text, position, color, size, font } = primitive else {
            unreachable!("dispatched on tag");
        };

        Ok(Self {
            content: text.clone(),
            position: Vec2::new(position[0], position[1]),
            font: font.clone().unwrap_or_else(|| DEFAULT_FONT.to_owned()),
            size: size.unwrap_or(Size::Pixels(12.0)),
            color: super::color_or_black(*color),
        })
    }
}
