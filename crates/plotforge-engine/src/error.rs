use std::fmt;

/// A fatal condition encountered while compiling one scene.
///
/// Every variant aborts the whole compile for that render call; no partial
/// buffers are ever handed to the GPU layer. There is no automatic retry —
/// the caller decides whether to re-request a corrected scene.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// A pixel-unit size was converted before axis resolution finished.
    OrderingViolation { what: String },
    /// A primitive arrived with too few points.
    ShapeArity { shape: &'static str, needed: usize, got: usize },
    /// Geometry that would emit NaN/infinite vertices (zero-length line,
    /// collapsed miter angle).
    Degenerate { what: String },
    /// Auto-ranging found no scannable geometry for this axis.
    UnresolvedAxis { axis: char },
    /// Resolved bounds violate `upper > lower`.
    InvalidAxisBounds { axis: char, lower: f32, upper: f32 },
    /// A glyph-atlas size bucket ran out of vertical space.
    AtlasFull { bucket: usize },
    /// Text was requested but no usable font is registered.
    UnknownFont { name: String },
    /// The task is tagged 2D but carries no scene payload.
    MissingScene,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::OrderingViolation { what } => {
                write!(f, "{what}: pixel-unit sizes cannot be converted before axis resolution")
            }
            CompileError::ShapeArity { shape, needed, got } => {
                write!(f, "{shape} requires at least {needed} points, got {got}")
            }
            CompileError::Degenerate { what } => write!(f, "degenerate geometry: {what}"),
            CompileError::UnresolvedAxis { axis } => {
                write!(f, "{axis}-axis bounds could not be derived from the scene; set explicit bounds")
            }
            CompileError::InvalidAxisBounds { axis, lower, upper } => {
                write!(f, "{axis}-axis bounds are invalid: [{lower}, {upper}]")
            }
            CompileError::AtlasFull { bucket } => {
                write!(f, "glyph atlas bucket {bucket} is out of space")
            }
            CompileError::UnknownFont { name } => {
                write!(f, "no font registered for {name:?} and no default font is loaded")
            }
            CompileError::MissingScene => write!(f, "render task has no 2D scene payload"),
        }
    }
}

impl std::error::Error for CompileError {}
