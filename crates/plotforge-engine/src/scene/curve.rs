use plotforge_protocol::{Primitive, Size};

use crate::error::CompileError;
use crate::paint::Rgba;

use super::ScenePoint;

/// Polyline stroked as a ribbon of per-segment quads.
///
/// Adjacent segments are not joined; sharp turns can show seams. That is a
/// known limitation of the ribbon construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub points: Vec<ScenePoint>,
    /// Stroke width; the wire default is one pixel.
    pub width: Size,
    pub stroke: Rgba,
}

impl Curve {
    pub(crate) fn from_wire(primitive: &Primitive) -> Result<Self, CompileError> {
        let Primitive::Curve { vertexes, width, color } = primitive else {
            unreachable!("dispatched on tag");
        };

        if vertexes.len() < 2 {
            return Err(CompileError::ShapeArity {
                shape: "curve",
                needed: 2,
                got: vertexes.len(),
            });
        }

        Ok(Self {
            points: vertexes.iter().map(ScenePoint::from_wire).collect(),
            width: width.map(Size::World).unwrap_or(Size::Pixels(1.0)),
            stroke: super::color_or_black(*color),
        })
    }
}
