//! Primitive tessellators.
//!
//! Responsibilities:
//! - turn each validated scene object into triangles, in world coordinates
//! - keep every emitted vertex finite; degenerate inputs fail the compile
//!   instead of leaking NaN into the buffers
//! - stay ignorant of axis bounds: the final NDC rescale happens once, in
//!   the compiler, after everything has been appended
//!
//! All sizes are converted through the unit normalizer at tessellation time,
//! so pixel-unit strokes work here (the normalizer is resolved by then).

mod circle;
mod curve;
mod line;
mod polygon;
mod text;

pub use circle::tessellate_circle;
pub use curve::tessellate_curve;
pub use line::tessellate_line;
pub use polygon::tessellate_polygon;
pub use text::tessellate_text;

use crate::coords::Vec2;
use crate::paint::Rgba;

/// Fragment shader blends flat vertex color.
pub const OP_FILL: u32 = 0;
/// Fragment shader multiplies vertex color by the atlas sample.
pub const OP_TEXT: u32 = 1;

/// One GPU-facing vertex, still in world coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    pub tex_layer: u32,
    pub op: u32,
}

impl Vertex {
    /// Untextured vertex (`op = 0`).
    #[inline]
    pub fn flat(pos: Vec2, color: Rgba) -> Self {
        Self {
            position: [pos.x, pos.y, 0.0, 1.0],
            color: color.to_array(),
            tex_coord: [0.0, 0.0],
            tex_layer: 0,
            op: OP_FILL,
        }
    }
}

/// Growing vertex/index accumulator for one compile.
///
/// Owned exclusively by a single compiler invocation; never shared.
#[derive(Debug, Default)]
pub struct GeometryBuf {
    pub vertexes: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl GeometryBuf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and returns its index.
    #[inline]
    pub fn push_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.vertexes.len() as u32;
        self.vertexes.push(vertex);
        index
    }

    #[inline]
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertexes.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Maps every position from world space into the `[-1, 1]²` axis box.
    ///
    /// `x' = (x - x_center) · x_scale`, likewise for y. Runs exactly once
    /// per compile, after the last primitive has been appended.
    pub fn rescale(&mut self, x_center: f32, x_scale: f32, y_center: f32, y_scale: f32) {
        for vertex in &mut self.vertexes {
            vertex.position[0] = (vertex.position[0] - x_center) * x_scale;
            vertex.position[1] = (vertex.position[1] - y_center) * y_scale;
        }
    }
}
