//! Polygon tessellation: fan triangulation plus mitered per-edge borders.

use std::f32::consts::PI;

use crate::coords::{Mat2, Vec2};
use crate::error::CompileError;
use crate::paint::Rgba;
use crate::scene::Polygon;
use crate::units::UnitNormalizer;

use super::{GeometryBuf, Vertex};

/// Fan-triangulates `points` from the first vertex.
///
/// Valid for convex or star-shaped-from-v0 outlines; `n` points emit
/// `n - 2` triangles. Shared by every filled shape in this module family
/// (polygons, border quads, strokes, arrowheads).
pub(super) fn fan(buf: &mut GeometryBuf, points: &[(Vec2, Rgba)]) {
    let start = buf.vertexes.len() as u32;
    for &(pos, color) in points {
        buf.push_vertex(Vertex::flat(pos, color));
    }
    for i in 1..points.len() as u32 - 1 {
        buf.push_triangle(start, start + i, start + i + 1);
    }
}

pub fn tessellate_polygon(
    buf: &mut GeometryBuf,
    poly: &Polygon,
    units: &UnitNormalizer,
) -> Result<(), CompileError> {
    let points: Vec<(Vec2, Rgba)> = poly
        .vertexes
        .iter()
        .map(|v| (v.pos, v.color.unwrap_or(poly.fill)))
        .collect();
    fan(buf, &points);

    if poly.has_border() {
        tessellate_borders(buf, poly, units)?;
    }
    Ok(())
}

/// Emits one mitered quad per bordered edge.
///
/// Edge `i` runs from vertex `i` to `i+1` (cyclic). The quad corners sit at
/// `vertex ± offset`, where the offset is the edge direction scaled by
/// `width / sin(angle/2)` and rotated by `π - angle/2` toward the outside.
/// `angle` is the interior turn angle at the corner; the edge-end corner
/// uses the trailing vertex's angle, the negated edge direction, and the
/// anticlockwise rotation sense.
fn tessellate_borders(
    buf: &mut GeometryBuf,
    poly: &Polygon,
    units: &UnitNormalizer,
) -> Result<(), CompileError> {
    let n = poly.vertexes.len();
    let positions: Vec<Vec2> = poly.vertexes.iter().map(|v| v.pos).collect();

    let mut edges = Vec::with_capacity(n);
    for i in 0..n {
        let edge = positions[(i + 1) % n] - positions[i];
        if edge.norm() == 0.0 {
            return Err(CompileError::Degenerate {
                what: format!("polygon edge {i} has zero length"),
            });
        }
        edges.push(edge);
    }

    // Interior turn angle at each vertex: π minus the angle between the
    // incoming and outgoing edge directions.
    let mut angles = Vec::with_capacity(n);
    for i in 0..n {
        let prev = edges[(i + n - 1) % n].unit();
        let cur = edges[i].unit();
        let dot = prev.dot(cur).clamp(-1.0, 1.0);
        angles.push(PI - dot.acos());
    }

    for (i, slot) in poly.borders.iter().enumerate() {
        let Some(border) = slot else { continue };
        let width = units.to_world(border.width)?;
        if width == 0.0 {
            continue;
        }

        let start_offset = miter_offset(edges[i].unit(), angles[i], width, i)?;
        let end_offset =
            miter_offset_acw(-edges[i].unit(), angles[(i + 1) % n], width, (i + 1) % n)?;

        let v1 = positions[i];
        let v2 = positions[(i + 1) % n];
        fan(buf, &[
            (v1 + start_offset, border.color),
            (v2 + end_offset, border.color),
            (v2 - end_offset, border.color),
            (v1 - start_offset, border.color),
        ]);
    }
    Ok(())
}

fn miter_gain(angle: f32, width: f32, corner: usize) -> Result<f32, CompileError> {
    let sin_half = (angle / 2.0).sin();
    if sin_half.abs() < 1e-4 {
        return Err(CompileError::Degenerate {
            what: format!("collapsed miter angle at polygon vertex {corner}"),
        });
    }
    Ok(width / sin_half)
}

fn miter_offset(
    edge_unit: Vec2,
    angle: f32,
    width: f32,
    corner: usize,
) -> Result<Vec2, CompileError> {
    let gain = miter_gain(angle, width, corner)?;
    Ok(Mat2::rotation(PI - angle / 2.0) * (edge_unit * gain))
}

fn miter_offset_acw(
    edge_unit: Vec2,
    angle: f32,
    width: f32,
    corner: usize,
) -> Result<Vec2, CompileError> {
    let gain = miter_gain(angle, width, corner)?;
    Ok(Mat2::rotation_acw(PI - angle / 2.0) * (edge_unit * gain))
}
