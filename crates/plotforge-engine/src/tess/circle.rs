//! Circle, arc, ring, and ring-segment tessellation.
//!
//! Partial arcs sample `segment_count + 1` angles. Full turns sample only
//! `segment_count` and close the loop back to the first rim vertex, so a
//! full 36-segment disc is exactly 36 rim vertices and 36 triangles with no
//! duplicated seam vertex.

use std::f32::consts::TAU;

use crate::coords::Vec2;
use crate::error::CompileError;
use crate::scene::Circle;
use crate::units::UnitNormalizer;

use super::{GeometryBuf, Vertex};

/// Angle ranges this close to a full turn close the loop.
const FULL_TURN_EPS: f32 = 0.001;

pub fn tessellate_circle(
    buf: &mut GeometryBuf,
    circle: &Circle,
    units: &UnitNormalizer,
) -> Result<(), CompileError> {
    let outer_r = units.to_world(circle.outer_radius)?;
    let inner_r = units.to_world(circle.inner_radius)?;
    if outer_r <= 0.0 || !outer_r.is_finite() {
        return Err(CompileError::Degenerate {
            what: format!("circle outer radius {outer_r}"),
        });
    }

    let mut angle_range = if circle.anticlockwise {
        circle.start_angle - circle.end_angle
    } else {
        circle.end_angle - circle.start_angle
    };
    if angle_range <= 0.0 {
        angle_range += TAU;
    }

    let segment_count = ((angle_range / TAU) * circle.segments as f32).ceil().max(1.0) as u32;
    let increment = angle_range / segment_count as f32;
    let full_turn = (angle_range - TAU).abs() < FULL_TURN_EPS;
    // Full turns drop the duplicate closing sample.
    let samples = if full_turn { segment_count } else { segment_count + 1 };

    let sample_at = |i: u32| {
        let angle = if circle.anticlockwise {
            circle.start_angle - i as f32 * increment
        } else {
            circle.start_angle + i as f32 * increment
        };
        Vec2::new(angle.cos(), angle.sin())
    };

    if inner_r == 0.0 {
        tessellate_disc(buf, circle, outer_r, samples, full_turn, sample_at);
    } else {
        tessellate_ring(buf, circle, outer_r, inner_r, samples, full_turn, sample_at);
    }
    Ok(())
}

/// Fan from the center vertex.
fn tessellate_disc(
    buf: &mut GeometryBuf,
    circle: &Circle,
    outer_r: f32,
    samples: u32,
    full_turn: bool,
    sample_at: impl Fn(u32) -> Vec2,
) {
    let center_index = buf.push_vertex(Vertex::flat(circle.center, circle.fill));

    for i in 0..samples {
        let rim = circle.center + sample_at(i) * outer_r;
        let rim_index = buf.push_vertex(Vertex::flat(rim, circle.fill));
        if i > 0 {
            buf.push_triangle(center_index, rim_index - 1, rim_index);
        }
    }

    if full_turn {
        let first = center_index + 1;
        let last = center_index + samples;
        buf.push_triangle(center_index, last, first);
    }
}

/// Outer/inner vertex pairs, quads between consecutive samples.
fn tessellate_ring(
    buf: &mut GeometryBuf,
    circle: &Circle,
    outer_r: f32,
    inner_r: f32,
    samples: u32,
    full_turn: bool,
    sample_at: impl Fn(u32) -> Vec2,
) {
    let start = buf.vertexes.len() as u32;

    for i in 0..samples {
        let dir = sample_at(i);
        let outer = buf.push_vertex(Vertex::flat(circle.center + dir * outer_r, circle.fill));
        let inner = buf.push_vertex(Vertex::flat(circle.center + dir * inner_r, circle.fill));
        if i > 0 {
            buf.push_triangle(outer - 2, inner - 2, outer);
            buf.push_triangle(inner - 2, inner, outer);
        }
    }

    if full_turn {
        let last_outer = start + (samples - 1) * 2;
        let last_inner = last_outer + 1;
        buf.push_triangle(last_outer, last_inner, start);
        buf.push_triangle(last_inner, start + 1, start);
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use plotforge_protocol::Size;

    use crate::paint::Rgba;

    use super::*;

    fn circle(outer: f32, inner: f32, start: f32, end: f32) -> Circle {
        Circle {
            center: Vec2::zero(),
            outer_radius: Size::World(outer),
            inner_radius: Size::World(inner),
            fill: Rgba::BLACK,
            start_angle: start,
            end_angle: end,
            anticlockwise: false,
            segments: 36,
        }
    }

    fn swept_angle(buf: &GeometryBuf, center_index: u32) -> f32 {
        // Sum of the angles subtended at the center over all triangles.
        buf.indices
            .chunks(3)
            .map(|tri| {
                assert_eq!(tri[0], center_index);
                let a = buf.vertexes[tri[1] as usize].position;
                let b = buf.vertexes[tri[2] as usize].position;
                let va = Vec2::new(a[0], a[1]).unit();
                let vb = Vec2::new(b[0], b[1]).unit();
                va.dot(vb).clamp(-1.0, 1.0).acos()
            })
            .sum()
    }

    #[test]
    fn full_disc_is_36_rim_vertices_and_36_triangles() {
        let mut buf = GeometryBuf::new();
        tessellate_circle(&mut buf, &circle(1.0, 0.0, 0.0, TAU), &UnitNormalizer::new())
            .unwrap();
        assert_eq!(buf.vertex_count(), 37); // center + 36 rim
        assert_eq!(buf.triangle_count(), 36);
        // Closed with no gap and no overlap: wedges sweep exactly 2π.
        assert!((swept_angle(&buf, 0) - TAU).abs() < 1e-3);
    }

    #[test]
    fn half_disc_sweeps_pi() {
        let mut buf = GeometryBuf::new();
        tessellate_circle(&mut buf, &circle(1.0, 0.0, 0.0, PI), &UnitNormalizer::new())
            .unwrap();
        assert_eq!(buf.triangle_count(), 18);
        assert_eq!(buf.vertex_count(), 20); // center + 19 rim samples
        assert!((swept_angle(&buf, 0) - PI).abs() < 1e-3);
    }

    #[test]
    fn full_ring_closes_without_duplicate_samples() {
        let mut buf = GeometryBuf::new();
        tessellate_circle(&mut buf, &circle(2.0, 1.0, 0.0, TAU), &UnitNormalizer::new())
            .unwrap();
        assert_eq!(buf.vertex_count(), 72); // 36 outer/inner pairs
        assert_eq!(buf.triangle_count(), 72); // 36 quads
        for v in &buf.vertexes {
            let r = Vec2::new(v.position[0], v.position[1]).norm();
            assert!((r - 2.0).abs() < 1e-5 || (r - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn arc_ring_is_open() {
        let mut buf = GeometryBuf::new();
        tessellate_circle(&mut buf, &circle(2.0, 1.0, 0.0, PI / 2.0), &UnitNormalizer::new())
            .unwrap();
        // ceil(0.25 · 36) = 9 segments, 10 sample pairs, 9 quads.
        assert_eq!(buf.vertex_count(), 20);
        assert_eq!(buf.triangle_count(), 18);
    }

    #[test]
    fn anticlockwise_quarter_arc_sweeps_the_other_way() {
        let mut buf = GeometryBuf::new();
        let mut c = circle(1.0, 0.0, PI / 2.0, 0.0);
        c.anticlockwise = true;
        tessellate_circle(&mut buf, &c, &UnitNormalizer::new()).unwrap();
        assert_eq!(buf.triangle_count(), 9);
        // First rim sample at π/2, last at 0.
        let first = &buf.vertexes[1].position;
        let last = &buf.vertexes[buf.vertex_count() - 1].position;
        assert!((first[0] - 0.0).abs() < 1e-5 && (first[1] - 1.0).abs() < 1e-5);
        assert!((last[0] - 1.0).abs() < 1e-5 && (last[1] - 0.0).abs() < 1e-5);
    }

    #[test]
    fn nonpositive_radius_is_degenerate() {
        let mut buf = GeometryBuf::new();
        let err =
            tessellate_circle(&mut buf, &circle(0.0, 0.0, 0.0, TAU), &UnitNormalizer::new())
                .unwrap_err();
        assert!(matches!(err, CompileError::Degenerate { .. }));
    }
}
