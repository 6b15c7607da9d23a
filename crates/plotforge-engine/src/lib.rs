//! Plotforge engine crate.
//!
//! This crate owns the scene-to-geometry compiler: it takes a decoded
//! [`plotforge_protocol::RenderTask`] plus a canvas size and produces resolved
//! axis bounds, flat vertex/index buffers in normalized device coordinates,
//! and a layered glyph-atlas texture ready for upload.
//!
//! GPU device setup and transport are collaborator seams ([`gpu`],
//! [`transport`]), not implemented here.

pub mod logging;

pub mod coords;
pub mod paint;

pub mod atlas;
pub mod axis;
pub mod scene;
pub mod tess;
pub mod units;

pub mod buffers;
pub mod compile;
pub mod error;

pub mod gpu;
pub mod transport;

pub use compile::{CanvasSize, CompileConfig, CompiledScene, SceneCompiler};
pub use error::CompileError;
