//! Color handling for scene compilation.

mod color;

pub use color::Rgba;
