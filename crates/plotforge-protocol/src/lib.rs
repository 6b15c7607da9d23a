//! Wire schema for plotforge render tasks.
//!
//! A producer (builder API, remote process) describes a 2D scene as a
//! `RenderTask`; the engine consumes it and compiles triangle geometry.
//! This crate only defines the schema:
//! - colors are `[r, g, b, a]` with rgb in `0..=255` and fractional alpha
//! - sizes are either world-unit numbers or pixel strings (`"4px"`)
//! - primitives are a closed tagged union discriminated by `"type"`

mod primitive;
mod size;
mod task;

pub use primitive::{ArrowSpec, ArrowStyle, Primitive, WireBorder, WireVertex};
pub use size::Size;
pub use task::{AxisSpec, RenderTask, Scene2D, SceneType};

/// RGBA color on the wire: rgb in `0..=255`, alpha in `0..=1`.
pub type WireColor = [f32; 4];

/// 3D world coordinate. The 2D pipeline uses x and y; z is carried through.
pub type Coordinate = [f32; 3];
