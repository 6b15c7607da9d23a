use core::ops::Mul;
use std::f32::consts::FRAC_1_SQRT_2;

use super::Vec2;

/// Row-major 2×2 matrix.
///
/// The scene description distinguishes two rotation senses:
/// - [`Mat2::rotation`] maps `(x, y)` to `(x·cos − y·sin, x·sin + y·cos)`
///   (the default, "non-anticlockwise" sense),
/// - [`Mat2::rotation_acw`] maps it to `(x·cos + y·sin, −x·sin + y·cos)`.
///
/// Miter and arrow construction depend on this pairing; do not "fix" one
/// without the other.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat2 {
    pub m: [f32; 4], // [a b; c d]
}

impl Mat2 {
    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { m: [a, b, c, d] }
    }

    #[inline]
    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Mat2::new(cos, -sin, sin, cos)
    }

    #[inline]
    pub fn rotation_acw(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Mat2::new(cos, sin, -sin, cos)
    }

    pub const ROT_CW_90: Mat2 = Mat2::new(0.0, 1.0, -1.0, 0.0);
    pub const ROT_ACW_90: Mat2 = Mat2::new(0.0, -1.0, 1.0, 0.0);
    pub const ROT_CW_45: Mat2 =
        Mat2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, -FRAC_1_SQRT_2, FRAC_1_SQRT_2);
    pub const ROT_ACW_45: Mat2 =
        Mat2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2, FRAC_1_SQRT_2, FRAC_1_SQRT_2);
    pub const ROT_CW_135: Mat2 =
        Mat2::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2, -FRAC_1_SQRT_2, -FRAC_1_SQRT_2);
    pub const ROT_ACW_135: Mat2 =
        Mat2::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2, FRAC_1_SQRT_2, -FRAC_1_SQRT_2);
}

impl Mul<Vec2> for Mat2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        let [a, b, c, d] = self.m;
        Vec2::new(a * v.x + b * v.y, c * v.x + d * v.y)
    }
}
