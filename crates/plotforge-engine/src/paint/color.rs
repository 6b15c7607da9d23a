use plotforge_protocol::WireColor;

/// Straight-alpha RGBA color with all channels in `[0, 1]`.
///
/// The wire format carries rgb in `0..=255` with fractional alpha; vertex
/// buffers want everything normalized. Blending happens on the GPU, so no
/// premultiplication is applied here.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Converts a wire color (`rgb` 0..=255, fractional alpha).
    #[inline]
    pub fn from_wire(c: WireColor) -> Self {
        Self {
            r: (c[0] / 255.0).clamp(0.0, 1.0),
            g: (c[1] / 255.0).clamp(0.0, 1.0),
            b: (c[2] / 255.0).clamp(0.0, 1.0),
            a: c[3].clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a.clamp(0.0, 1.0))
    }

    /// Channel-wise linear interpolation toward `to` (arrow gradients).
    #[inline]
    pub fn lerp(self, to: Rgba, t: f32) -> Rgba {
        Rgba {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
            a: self.a + (to.a - self.a) * t,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}
