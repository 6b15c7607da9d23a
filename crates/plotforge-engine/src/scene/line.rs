use plotforge_protocol::{ArrowStyle, Primitive, Size};

use crate::error::CompileError;
use crate::paint::Rgba;

use super::ScenePoint;

/// Arrowhead styles the tessellator knows how to build.
///
/// The wire format also names `circle` and `none`; both decode to "no
/// arrow" (the original renderer never implemented `circle` caps).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ArrowKind {
    /// Solid triangular head.
    Triangle,
    /// Notched (bowtie) head built from two quads.
    Shape,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub kind: ArrowKind,
    /// Arrow length; `None` selects the style-specific default
    /// (1.5× stroke width for triangle, 1× for shape).
    pub size: Option<Size>,
}

/// Straight stroke with independent endpoint colors and optional arrowheads.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub p0: ScenePoint,
    pub p1: ScenePoint,
    pub width: Size,
    pub fill: Rgba,
    pub start_arrow: Option<Arrow>,
    pub end_arrow: Option<Arrow>,
}

impl Line {
    pub(crate) fn from_wire(primitive: &Primitive) -> Result<Self, CompileError> {
        let Primitive::Line { endpoints, width, fill, start_arrow, end_arrow } = primitive else {
            unreachable!("dispatched on tag");
        };

        let decode_arrow = |spec: &plotforge_protocol::ArrowSpec| match spec.style {
            ArrowStyle::TriangleArrow => Some(Arrow { kind: ArrowKind::Triangle, size: spec.size }),
            ArrowStyle::ShapeArrow => Some(Arrow { kind: ArrowKind::Shape, size: spec.size }),
            ArrowStyle::Circle | ArrowStyle::None => None,
        };

        Ok(Self {
            p0: ScenePoint::from_wire(&endpoints[0]),
            p1: ScenePoint::from_wire(&endpoints[1]),
            width: width.unwrap_or(Size::World(1.0)),
            fill: super::color_or_black(*fill),
            start_arrow: start_arrow.as_ref().and_then(decode_arrow),
            end_arrow: end_arrow.as_ref().and_then(decode_arrow),
        })
    }

    /// Endpoint color, falling back to the stroke fill.
    #[inline]
    pub fn start_color(&self) -> Rgba {
        self.p0.color.unwrap_or(self.fill)
    }

    #[inline]
    pub fn end_color(&self) -> Rgba {
        self.p1.color.unwrap_or(self.fill)
    }
}
