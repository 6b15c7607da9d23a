use std::f32::consts::TAU;

use plotforge_protocol::{Primitive, Size};

use crate::coords::Vec2;
use crate::error::CompileError;
use crate::paint::Rgba;

/// Filled disc, arc wedge, or ring segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub outer_radius: Size,
    /// Zero means a filled disc; positive means a ring.
    pub inner_radius: Size,
    pub fill: Rgba,
    pub start_angle: f32,
    pub end_angle: f32,
    pub anticlockwise: bool,
    /// Segment count for a full turn; partial arcs use a proportional share.
    pub segments: u32,
}

pub(crate) const DEFAULT_SEGMENTS: u32 = 36;

impl Circle {
    pub(crate) fn from_wire(primitive: &Primitive) -> Result<Self, CompileError> {
        let Primitive::Circle {
            center,
            outer_radius,
            inner_radius,
            fill,
            start_angle,
            end_angle,
            anticlockwise,
            segments,
        } = primitive
        else {
            unreachable!("dispatched on tag");
        };

        Ok(Self {
            center: Vec2::new(center.xyz[0], center.xyz[1]),
            outer_radius: *outer_radius,
            inner_radius: inner_radius.unwrap_or(Size::World(0.0)),
            fill: super::color_or_black(*fill),
            start_angle: start_angle.unwrap_or(0.0),
            end_angle: end_angle.unwrap_or(TAU),
            anticlockwise: anticlockwise.unwrap_or(false),
            segments: segments.unwrap_or(DEFAULT_SEGMENTS).max(1),
        })
    }
}
