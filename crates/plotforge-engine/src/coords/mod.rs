//! Fixed-shape vector/matrix types used throughout tessellation.
//!
//! Everything here is plain `f32` value math: no allocation, no dynamic
//! shapes. Rotation conventions follow the scene description's notion of
//! "anticlockwise" (see [`Mat2::rotation`] / [`Mat2::rotation_acw`]).

mod mat2;
mod vec2;

pub use mat2::Mat2;
pub use vec2::Vec2;
