//! GPU collaborator boundary.
//!
//! Device, swapchain, and pipeline setup live outside this crate. The
//! compiler only needs the handful of operations below: allocate buffers,
//! upload bytes and atlas layers, submit one indexed draw, and wait for it.
//! [`present_frame`] drives that sequence for a compiled scene.

use anyhow::{Context, Result};

use crate::atlas::{ATLAS_LAYERS, ATLAS_SIZE};
use crate::compile::CompiledScene;

/// Opaque handle to a device-side buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BufferId(pub u64);

/// Opaque handle to a device-side texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u64);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferKind {
    Vertex,
    Index,
}

/// Operations the renderer consumes from the GPU layer.
///
/// Implementations are expected to be synchronous from the compiler's
/// perspective; [`RenderDevice::await_completion`] is the only suspension
/// point and it blocks until the submitted work is done.
pub trait RenderDevice {
    fn create_buffer(&mut self, kind: BufferKind, len: usize) -> Result<BufferId>;
    fn write_buffer(&mut self, buffer: BufferId, bytes: &[u8]) -> Result<()>;
    /// Creates a layered 2D RGBA texture of `size × size × layers`.
    fn create_texture(&mut self, size: u32, layers: u32) -> Result<TextureId>;
    fn copy_bitmap_to_texture_layer(
        &mut self,
        texture: TextureId,
        layer: u32,
        rgba: &[u8],
    ) -> Result<()>;
    fn submit_draw_indexed(
        &mut self,
        vertex_buffers: [BufferId; 2],
        index_buffer: BufferId,
        index_count: u32,
    ) -> Result<()>;
    fn await_completion(&mut self) -> Result<()>;
}

/// Uploads a compiled scene and draws it.
///
/// Either everything is submitted or the frame is abandoned with an error;
/// no partial buffers reach the draw call.
pub fn present_frame(device: &mut dyn RenderDevice, scene: &CompiledScene) -> Result<()> {
    let stream_a = scene.streams.stream_a_bytes();
    let stream_b = scene.streams.stream_b_bytes();
    let indices = scene.streams.index_bytes();

    let buffer_a = device
        .create_buffer(BufferKind::Vertex, stream_a.len())
        .context("create vertex stream A")?;
    device.write_buffer(buffer_a, stream_a)?;

    let buffer_b = device
        .create_buffer(BufferKind::Vertex, stream_b.len())
        .context("create vertex stream B")?;
    device.write_buffer(buffer_b, stream_b)?;

    let index_buffer = device
        .create_buffer(BufferKind::Index, indices.len())
        .context("create index buffer")?;
    device.write_buffer(index_buffer, indices)?;

    let atlas = device
        .create_texture(ATLAS_SIZE, ATLAS_LAYERS as u32)
        .context("create glyph atlas texture")?;
    for (layer, bytes) in scene.atlas_layers.iter().enumerate() {
        device
            .copy_bitmap_to_texture_layer(atlas, layer as u32, bytes)
            .with_context(|| format!("upload atlas layer {layer}"))?;
    }

    device.submit_draw_indexed(
        [buffer_a, buffer_b],
        index_buffer,
        scene.streams.index_count(),
    )?;
    device.await_completion().context("await frame completion")
}
