//! GPU buffer assembly.
//!
//! Packs the compiled geometry into the exact byte layout the two vertex
//! streams expect:
//! - stream A, stride 40: `position:f32×4 @0, color:f32×4 @16,
//!   tex_coord:f32×2 @32`
//! - stream B, stride 8: `tex_layer:u32 @0, op:u32 @4`
//! - index stream: `u32`, triangle-list topology
//!
//! The structs are `repr(C)` + `Pod`, so upload is a `bytemuck` cast with
//! no copy or per-field serialization.

use bytemuck::{Pod, Zeroable};

use crate::tess::GeometryBuf;

/// Stream A element. 40 bytes, field offsets fixed by the shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct VertexA {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
}

/// Stream B element. 8 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct VertexB {
    pub tex_layer: u32,
    pub op: u32,
}

const _: () = assert!(std::mem::size_of::<VertexA>() == 40);
const _: () = assert!(std::mem::size_of::<VertexB>() == 8);

/// Packed per-render buffers, ready for upload.
#[derive(Debug, Default)]
pub struct VertexStreams {
    pub stream_a: Vec<VertexA>,
    pub stream_b: Vec<VertexB>,
    pub indices: Vec<u32>,
}

impl VertexStreams {
    pub fn pack(geometry: &GeometryBuf) -> Self {
        let stream_a = geometry
            .vertexes
            .iter()
            .map(|v| VertexA {
                position: v.position,
                color: v.color,
                tex_coord: v.tex_coord,
            })
            .collect();
        let stream_b = geometry
            .vertexes
            .iter()
            .map(|v| VertexB { tex_layer: v.tex_layer, op: v.op })
            .collect();
        Self { stream_a, stream_b, indices: geometry.indices.clone() }
    }

    pub fn stream_a_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.stream_a)
    }

    pub fn stream_b_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.stream_b)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::Vec2;
    use crate::paint::Rgba;
    use crate::tess::{Vertex, OP_TEXT};

    use super::*;

    #[test]
    fn byte_lengths_match_strides() {
        let mut geometry = GeometryBuf::new();
        for i in 0..3 {
            geometry.push_vertex(Vertex::flat(Vec2::new(i as f32, 0.0), Rgba::BLACK));
        }
        geometry.push_triangle(0, 1, 2);

        let streams = VertexStreams::pack(&geometry);
        assert_eq!(streams.stream_a_bytes().len(), 3 * 40);
        assert_eq!(streams.stream_b_bytes().len(), 3 * 8);
        assert_eq!(streams.index_bytes().len(), 3 * 4);
        assert_eq!(streams.index_count(), 3);
    }

    #[test]
    fn stream_a_layout_is_position_color_texcoord() {
        let mut geometry = GeometryBuf::new();
        geometry.push_vertex(Vertex {
            position: [1.0, 2.0, 0.0, 1.0],
            color: [0.5, 0.25, 0.0, 1.0],
            tex_coord: [0.125, 0.75],
            tex_layer: 2,
            op: OP_TEXT,
        });

        let streams = VertexStreams::pack(&geometry);
        let bytes = streams.stream_a_bytes();
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[1.0, 2.0, 0.0, 1.0, 0.5, 0.25, 0.0, 1.0, 0.125, 0.75]);

        let b: &[u32] = bytemuck::cast_slice(streams.stream_b_bytes());
        assert_eq!(b, &[2, OP_TEXT]);
    }
}
