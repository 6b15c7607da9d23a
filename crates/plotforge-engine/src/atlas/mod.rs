//! Glyph atlas cache.
//!
//! Characters are rasterized once per renderer session and packed into four
//! fixed 256×256 RGBA pages, one per font-size bucket. The pages upload as
//! the four layers of a single texture array each render.
//!
//! Bucket `i` rasterizes at `(i + 1) · 32` px and serves requested pixel
//! sizes in `(32·i, 32·(i+1)]`; larger requests clamp to the last bucket.
//! The cache is keyed by `(char, font family, bold)` within a bucket and is
//! never evicted. It is not safe for concurrent writers; one compile runs
//! at a time against it.

mod fonts;

pub use fonts::{FontLoadError, FontStore};

use std::collections::HashMap;

use crate::error::CompileError;

/// Page edge length in pixels (per layer).
pub const ATLAS_SIZE: u32 = 256;
/// Number of size buckets, and texture array layers.
pub const ATLAS_LAYERS: usize = 4;
/// Pixels between packed glyphs, so linear sampling does not bleed.
const GLYPH_PADDING: u32 = 1;

/// Placement and metrics of one cached glyph.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlyphInfo {
    /// Texture array layer (= size bucket).
    pub layer: u32,
    /// Position in the page, pixels.
    pub x: u32,
    pub y: u32,
    /// Raster dimensions, pixels. Zero for invisible glyphs (spaces).
    pub width: u32,
    pub height: u32,
    /// Horizontal bearing to apply when placing the quad.
    pub x_offset: f32,
    /// Vertical bearing; the only vertical positioning used (no baseline
    /// or line-height model, single-line text only).
    pub y_offset: f32,
    /// Pen advance after this glyph, at the bucket's raster size.
    pub x_advance: f32,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct GlyphKey {
    ch: char,
    font: String,
    bold: bool,
}

/// One shelf-packed RGBA page.
struct AtlasPage {
    pixels: Vec<u8>,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
}

impl AtlasPage {
    fn new() -> Self {
        Self {
            pixels: vec![0; (ATLAS_SIZE * ATLAS_SIZE * 4) as usize],
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
        }
    }

    /// Reserves a `w × h` region, wrapping to a new shelf row when the
    /// current one is horizontally exhausted. `None` means the region does
    /// not fit: wider than a row, or the page is out of vertical space.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w + 2 * GLYPH_PADDING > ATLAS_SIZE {
            return None;
        }
        if self.cursor_x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.cursor_y + h + GLYPH_PADDING > ATLAS_SIZE {
            return None;
        }

        let pos = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(pos)
    }

    /// Writes a coverage bitmap as white RGBA (alpha = coverage), so the
    /// color×texture shader path tints glyphs with the vertex color.
    fn blit(&mut self, x: u32, y: u32, w: u32, h: u32, coverage: &[u8]) {
        for row in 0..h {
            for col in 0..w {
                let c = coverage[(row * w + col) as usize];
                let at = (((y + row) * ATLAS_SIZE + (x + col)) * 4) as usize;
                self.pixels[at..at + 4].copy_from_slice(&[255, 255, 255, c]);
            }
        }
    }
}

/// Session-scoped cache of rasterized glyphs.
pub struct GlyphAtlas {
    pages: [AtlasPage; ATLAS_LAYERS],
    caches: [HashMap<GlyphKey, GlyphInfo>; ATLAS_LAYERS],
}

impl GlyphAtlas {
    pub fn new() -> Self {
        Self {
            pages: std::array::from_fn(|_| AtlasPage::new()),
            caches: std::array::from_fn(|_| HashMap::new()),
        }
    }

    /// Bucket index serving `size_px`.
    #[inline]
    pub fn bucket_for(size_px: u32) -> usize {
        (((size_px.max(1) - 1) / 32) as usize).min(ATLAS_LAYERS - 1)
    }

    /// Rasterization size of a bucket, in pixels.
    #[inline]
    pub fn raster_size(bucket: usize) -> f32 {
        ((bucket + 1) * 32) as f32
    }

    /// Returns the cached glyph, rasterizing and packing it on first use.
    pub fn get_or_insert(
        &mut self,
        font_name: &str,
        font: &fontdue::Font,
        ch: char,
        bold: bool,
        bucket: usize,
    ) -> Result<GlyphInfo, CompileError> {
        let key = GlyphKey { ch, font: font_name.to_owned(), bold };
        if let Some(info) = self.caches[bucket].get(&key) {
            return Ok(*info);
        }

        let (metrics, coverage) = font.rasterize(ch, Self::raster_size(bucket));
        let (w, h) = (metrics.width as u32, metrics.height as u32);

        let (x, y) = if w == 0 || h == 0 {
            (0, 0) // nothing to pack; keep the advance
        } else {
            self.pages[bucket]
                .place(w, h)
                .ok_or(CompileError::AtlasFull { bucket })?
        };
        if w > 0 && h > 0 {
            self.pages[bucket].blit(x, y, w, h, &coverage);
        }

        let info = GlyphInfo {
            layer: bucket as u32,
            x,
            y,
            width: w,
            height: h,
            x_offset: metrics.xmin as f32,
            y_offset: metrics.ymin as f32,
            x_advance: metrics.advance_width,
        };
        self.caches[bucket].insert(key, info);
        Ok(info)
    }

    /// Raw RGBA bytes of one page, for texture upload.
    pub fn layer_bytes(&self, layer: usize) -> &[u8] {
        &self.pages[layer].pixels
    }

    /// Owned copy of all pages, in layer order.
    pub fn snapshot_layers(&self) -> [Vec<u8>; ATLAS_LAYERS] {
        std::array::from_fn(|i| self.pages[i].pixels.clone())
    }

    /// Total cached glyphs across all buckets.
    pub fn cached_count(&self) -> usize {
        self.caches.iter().map(HashMap::len).sum()
    }

    /// Test seam: installs a glyph without touching a real font.
    #[cfg(test)]
    pub(crate) fn seed_glyph(
        &mut self,
        ch: char,
        font: &str,
        bold: bool,
        bucket: usize,
        info: GlyphInfo,
    ) {
        self.caches[bucket].insert(GlyphKey { ch, font: font.to_owned(), bold }, info);
    }
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        Self::new()
    }
}
