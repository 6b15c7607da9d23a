//! Text tessellation: one textured quad per visible glyph.
//!
//! Glyphs come from the session atlas, rasterized at the bucket's fixed
//! size and scaled down to the requested pixel size by `ratio`. Layout is a
//! single left-to-right pen advance; there is no baseline or line-height
//! model, single-line text only.

use crate::atlas::{FontStore, GlyphAtlas, GlyphInfo, ATLAS_SIZE};
use crate::coords::Vec2;
use crate::error::CompileError;
use crate::paint::Rgba;
use crate::scene::Text;
use crate::units::UnitNormalizer;

use super::{GeometryBuf, Vertex, OP_TEXT};

pub fn tessellate_text(
    buf: &mut GeometryBuf,
    text: &Text,
    units: &UnitNormalizer,
    fonts: &FontStore,
    atlas: &mut GlyphAtlas,
) -> Result<(), CompileError> {
    let one_pixel = units.pixel_to_world().ok_or_else(|| CompileError::OrderingViolation {
        what: "text layout".to_owned(),
    })?;

    let size_world = units.to_world(text.size)?;
    let size_px = (size_world / one_pixel).ceil().max(1.0) as u32;
    let bucket = GlyphAtlas::bucket_for(size_px);
    let ratio = size_px as f32 / GlyphAtlas::raster_size(bucket);

    let (canonical, font) = fonts.resolve(&text.font)?;
    let mut glyphs = Vec::with_capacity(text.content.chars().count());
    for ch in text.content.chars() {
        glyphs.push(atlas.get_or_insert(canonical, font, ch, false, bucket)?);
    }

    layout_glyphs(buf, text.position, text.color, &glyphs, ratio, one_pixel);
    Ok(())
}

/// Emits the glyph quads for one run of text anchored at `anchor`.
///
/// `ratio` maps bucket-raster pixels to requested pixels; `one_pixel` maps
/// pixels to world units. Invisible glyphs (spaces) advance the pen without
/// emitting geometry.
pub(crate) fn layout_glyphs(
    buf: &mut GeometryBuf,
    anchor: Vec2,
    color: Rgba,
    glyphs: &[GlyphInfo],
    ratio: f32,
    one_pixel: f32,
) {
    let scale = ratio * one_pixel;
    let atlas_size = ATLAS_SIZE as f32;
    let mut pen_x = 0.0;

    for glyph in glyphs {
        if glyph.width > 0 && glyph.height > 0 {
            let x1 = anchor.x + pen_x + glyph.x_offset * scale;
            let y1 = anchor.y + glyph.y_offset * scale;
            let x2 = x1 + glyph.width as f32 * scale;
            let y2 = y1 - glyph.height as f32 * scale;

            let u1 = glyph.x as f32 / atlas_size;
            let v1 = glyph.y as f32 / atlas_size;
            let u2 = (glyph.x + glyph.width) as f32 / atlas_size;
            let v2 = (glyph.y + glyph.height) as f32 / atlas_size;

            let start = buf.vertexes.len() as u32;
            for (pos, uv) in [
                ([x1, y1], [u1, v1]),
                ([x2, y1], [u2, v1]),
                ([x1, y2], [u1, v2]),
                ([x2, y2], [u2, v2]),
            ] {
                buf.push_vertex(Vertex {
                    position: [pos[0], pos[1], 0.0, 1.0],
                    color: color.to_array(),
                    tex_coord: uv,
                    tex_layer: glyph.layer,
                    op: OP_TEXT,
                });
            }
            buf.push_triangle(start, start + 1, start + 2);
            buf.push_triangle(start + 2, start + 1, start + 3);
        }

        pen_x += glyph.x_advance * scale;
    }
}
