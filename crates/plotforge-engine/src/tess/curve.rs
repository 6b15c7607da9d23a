//! Curve tessellation: one width-extruded quad per consecutive point pair.
//!
//! Segments are independent ribbons with no joint smoothing, so sharp turns
//! can show seams. Zero-length segments are dropped rather than failing the
//! compile; repeated points are common in sampled data.

use crate::error::CompileError;
use crate::paint::Rgba;
use crate::scene::Curve;
use crate::units::UnitNormalizer;

use super::polygon::fan;
use super::GeometryBuf;

pub fn tessellate_curve(
    buf: &mut GeometryBuf,
    curve: &Curve,
    units: &UnitNormalizer,
) -> Result<(), CompileError> {
    let width = units.to_world(curve.width)?;

    for (i, pair) in curve.points.windows(2).enumerate() {
        let (p0, p1) = (pair[0], pair[1]);
        let vec = p1.pos - p0.pos;
        if vec.norm() == 0.0 {
            log::debug!("skipping zero-length curve segment {i}");
            continue;
        }

        let offset = vec.unit().perp() * (width / 2.0);
        let start: Rgba = p0.color.unwrap_or(curve.stroke);
        let end: Rgba = p1.color.unwrap_or(curve.stroke);
        fan(buf, &[
            (p0.pos + offset, start),
            (p1.pos + offset, end),
            (p1.pos - offset, end),
            (p0.pos - offset, start),
        ]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use plotforge_protocol::Size;

    use crate::coords::Vec2;
    use crate::scene::ScenePoint;

    use super::*;

    fn curve_of(points: &[[f32; 2]]) -> Curve {
        Curve {
            points: points
                .iter()
                .map(|p| ScenePoint { pos: Vec2::new(p[0], p[1]), color: None })
                .collect(),
            width: Size::World(0.5),
            stroke: Rgba::BLACK,
        }
    }

    #[test]
    fn each_segment_is_one_quad() {
        let mut buf = GeometryBuf::new();
        let curve = curve_of(&[[0.0, 0.0], [1.0, 0.0], [2.0, 1.0], [3.0, 1.0]]);
        tessellate_curve(&mut buf, &curve, &UnitNormalizer::new()).unwrap();
        assert_eq!(buf.triangle_count(), 6);
        assert_eq!(buf.vertex_count(), 12);
    }

    #[test]
    fn zero_length_segments_are_dropped() {
        let mut buf = GeometryBuf::new();
        let curve = curve_of(&[[0.0, 0.0], [0.0, 0.0], [1.0, 0.0]]);
        tessellate_curve(&mut buf, &curve, &UnitNormalizer::new()).unwrap();
        assert_eq!(buf.triangle_count(), 2);
    }

    #[test]
    fn per_point_colors_reach_quad_corners() {
        let red = Rgba { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
        let mut curve = curve_of(&[[0.0, 0.0], [1.0, 0.0]]);
        curve.points[1].color = Some(red);
        let mut buf = GeometryBuf::new();
        tessellate_curve(&mut buf, &curve, &UnitNormalizer::new()).unwrap();
        assert_eq!(buf.vertexes[0].color, Rgba::BLACK.to_array());
        assert_eq!(buf.vertexes[1].color, red.to_array());
        assert_eq!(buf.vertexes[2].color, red.to_array());
        assert_eq!(buf.vertexes[3].color, Rgba::BLACK.to_array());
    }
}
