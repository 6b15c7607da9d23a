//! Validated scene types.
//!
//! Responsibilities:
//! - decode wire primitives into typed, arity-checked shapes
//! - keep shape-specific decode rules isolated per shape file
//! - present one closed [`SceneObject`] sum type so the compiler's dispatch
//!   is a single exhaustive match
//!
//! Sizes stay in wire units here; conversion happens in the tessellators
//! through the unit normalizer, after axis resolution.

mod circle;
mod curve;
mod line;
mod polygon;
mod text;

pub use circle::Circle;
pub use curve::Curve;
pub use line::{Arrow, ArrowKind, Line};
pub use polygon::{Border, Polygon};
pub use text::Text;

pub(crate) use text::DEFAULT_FONT;

use plotforge_protocol::{Primitive, Scene2D, WireColor, WireVertex};

use crate::coords::Vec2;
use crate::error::CompileError;
use crate::paint::Rgba;

/// A positioned point with an optional per-point color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScenePoint {
    pub pos: Vec2,
    pub color: Option<Rgba>,
}

impl ScenePoint {
    pub(crate) fn from_wire(v: &WireVertex) -> Self {
        Self {
            pos: Vec2::new(v.xyz[0], v.xyz[1]),
            color: v.color.map(Rgba::from_wire),
        }
    }
}

pub(crate) fn color_or_black(c: Option<WireColor>) -> Rgba {
    c.map(Rgba::from_wire).unwrap_or(Rgba::BLACK)
}

/// One drawable object, decoded and validated.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    Line(Line),
    Circle(Circle),
    Polygon(Polygon),
    Curve(Curve),
    Text(Text),
}

/// A decoded 2D scene, ready for axis resolution and tessellation.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub x_axis: Option<plotforge_protocol::AxisSpec>,
    pub y_axis: Option<plotforge_protocol::AxisSpec>,
    pub grid: bool,
    pub tick: bool,
    pub background: Rgba,
    pub objects: Vec<SceneObject>,
}

/// Clear color used when the scene does not specify one (transparent white).
const DEFAULT_BACKGROUND: WireColor = [255.0, 255.0, 255.0, 0.0];

impl Scene {
    /// Decodes and validates a wire scene. Shape-arity violations surface
    /// here, before any geometry work starts.
    pub fn from_wire(wire: &Scene2D) -> Result<Self, CompileError> {
        let mut objects = Vec::with_capacity(wire.objects.len());
        for primitive in &wire.objects {
            objects.push(match primitive {
                Primitive::Line { .. } => SceneObject::Line(Line::from_wire(primitive)?),
                Primitive::Circle { .. } => SceneObject::Circle(Circle::from_wire(primitive)?),
                Primitive::Polygon { .. } => SceneObject::Polygon(Polygon::from_wire(primitive)?),
                Primitive::Curve { .. } => SceneObject::Curve(Curve::from_wire(primitive)?),
                Primitive::Text { .. } => SceneObject::Text(Text::from_wire(primitive)?),
            });
        }

        Ok(Self {
            x_axis: wire.x_axis.clone(),
            y_axis: wire.y_axis.clone(),
            grid: wire.grid,
            tick: wire.tick,
            background: Rgba::from_wire(wire.background.unwrap_or(DEFAULT_BACKGROUND)),
            objects,
        })
    }
}
