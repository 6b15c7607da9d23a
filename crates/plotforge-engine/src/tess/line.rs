//! Line tessellation: width-extruded stroke quad plus optional arrowheads.
//!
//! Arrowheads are built first and pull the affected endpoint inward, so the
//! shaft quad never pokes through the head. Arrow base colors are sampled
//! from the stroke gradient at the arrow's depth along the line, keeping
//! the head/shaft seam continuous when endpoint colors differ.

use std::f32::consts::SQRT_2;

use crate::coords::{Mat2, Vec2};
use crate::error::CompileError;
use crate::paint::Rgba;
use crate::scene::{ArrowKind, Line};
use crate::units::UnitNormalizer;

use super::polygon::fan;
use super::GeometryBuf;

pub fn tessellate_line(
    buf: &mut GeometryBuf,
    line: &Line,
    units: &UnitNormalizer,
) -> Result<(), CompileError> {
    let width = units.to_world(line.width)?;
    let mut p0 = line.p0.pos;
    let mut p1 = line.p1.pos;

    let length = (p1 - p0).norm();
    if length == 0.0 || !length.is_finite() {
        return Err(CompileError::Degenerate {
            what: format!("zero-length line at ({}, {})", p0.x, p0.y),
        });
    }

    let start = line.start_color();
    let end = line.end_color();
    // Shaft endpoint colors; replaced by the gradient sample where an arrow
    // shortens that end.
    let mut shaft_start = start;
    let mut shaft_end = end;

    if let Some(arrow) = &line.start_arrow {
        let arrow_len = match arrow.size {
            Some(size) => units.to_world(size)?,
            None => default_arrow_len(arrow.kind, width),
        };
        let (new_p0, color) = match arrow.kind {
            ArrowKind::Triangle => {
                triangle_arrow(buf, p0, p1, arrow_len, length, start, end)?
            }
            ArrowKind::Shape => shape_arrow(buf, p0, p1, arrow_len, length, start, end)?,
        };
        p0 = new_p0;
        shaft_start = color;
    }

    if let Some(arrow) = &line.end_arrow {
        let arrow_len = match arrow.size {
            Some(size) => units.to_world(size)?,
            None => default_arrow_len(arrow.kind, width),
        };
        // Mirrored construction: same builders, endpoints swapped.
        let (new_p1, color) = match arrow.kind {
            ArrowKind::Triangle => {
                triangle_arrow(buf, p1, p0, arrow_len, length, end, start)?
            }
            ArrowKind::Shape => shape_arrow(buf, p1, p0, arrow_len, length, end, start)?,
        };
        p1 = new_p1;
        shaft_end = color;
    }

    let shaft = p1 - p0;
    let shaft_len = shaft.norm();
    if shaft_len == 0.0 || !shaft_len.is_finite() {
        // Arrows consumed the whole line.
        return Err(CompileError::Degenerate {
            what: "arrowheads longer than the line they decorate".to_owned(),
        });
    }
    let offset = shaft.unit().perp() * (width / 2.0);
    fan(buf, &[
        (p0 + offset, shaft_start),
        (p1 + offset, shaft_end),
        (p1 - offset, shaft_end),
        (p0 - offset, shaft_start),
    ]);
    Ok(())
}

fn default_arrow_len(kind: ArrowKind, width: f32) -> f32 {
    match kind {
        ArrowKind::Triangle => width * 1.5,
        ArrowKind::Shape => width,
    }
}

/// Solid triangular head at `tip`, pointing away from `other`.
///
/// The tip keeps its endpoint color; the two base corners take the stroke
/// gradient sampled at `t = arrow_len / line_len`. Returns the shortened
/// endpoint and that base color.
fn triangle_arrow(
    buf: &mut GeometryBuf,
    tip: Vec2,
    other: Vec2,
    arrow_len: f32,
    line_len: f32,
    tip_color: Rgba,
    other_color: Rgba,
) -> Result<(Vec2, Rgba), CompileError> {
    let along = (other - tip).unit() * arrow_len;
    let base = tip + along;
    let half = along * 0.5;

    let wing1 = base + Mat2::ROT_CW_90 * half;
    let wing2 = base + Mat2::ROT_ACW_90 * half;

    let base_color = tip_color.lerp(other_color, arrow_len / line_len);
    fan(buf, &[(tip, tip_color), (wing1, base_color), (wing2, base_color)]);
    Ok((base, base_color))
}

/// Notched (bowtie) head at `tip`: two quads built from 45°/135° rotations
/// of the half-width vector and the full arrow vector, leaving a concave
/// notch at the back. The head spans `arrow_len · √2` along the line.
fn shape_arrow(
    buf: &mut GeometryBuf,
    tip: Vec2,
    other: Vec2,
    arrow_len: f32,
    line_len: f32,
    tip_color: Rgba,
    other_color: Rgba,
) -> Result<(Vec2, Rgba), CompileError> {
    let toward_tip = (tip - other).unit();
    let vt_width = toward_tip * arrow_len;
    let vt_arrow = vt_width * SQRT_2;

    let base = tip - vt_arrow;

    let vt_a = Mat2::ROT_CW_45 * vt_width;
    let vt_b = Mat2::ROT_ACW_45 * vt_width;
    let vt_c = Mat2::ROT_CW_135 * vt_arrow;
    let vt_d = Mat2::ROT_ACW_135 * vt_arrow;
    let vt_e = vt_c + vt_a;
    let vt_f = vt_d + vt_b;

    let base_color = tip_color.lerp(other_color, vt_arrow.norm() / line_len);

    fan(buf, &[
        (base, base_color),
        (tip, tip_color),
        (base + vt_e, base_color),
        (base + vt_c, base_color),
    ]);
    fan(buf, &[
        (base, base_color),
        (tip, tip_color),
        (base + vt_f, base_color),
        (base + vt_d, base_color),
    ]);
    Ok((base, base_color))
}
