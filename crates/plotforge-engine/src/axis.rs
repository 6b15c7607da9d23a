//! Axis bound resolution.
//!
//! Explicit bounds are used verbatim, with no padding. When either bound of
//! an axis is missing, both are derived by scanning primitive extents:
//! - lines extend by half their world-converted stroke width at both ends
//! - circles reserve the full bounding box of the outer radius, even for
//!   small arcs or rings
//! - polygon vertices and curve points contribute directly
//!
//! Text is not scanned: its extent depends on `pixel_to_world`, which does
//! not exist until bounds are resolved. A scene whose auto-ranged axis sees
//! no scannable geometry fails fast instead of rendering garbage.

use plotforge_protocol::AxisSpec;

use crate::error::CompileError;
use crate::paint::Rgba;
use crate::scene::SceneObject;
use crate::units::UnitNormalizer;

/// Fully resolved axis: both bounds concrete, `upper > lower`.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub lower_bound: f32,
    pub upper_bound: f32,
    pub display: bool,
    pub color: Rgba,
    pub label: String,
}

impl Axis {
    #[inline]
    pub fn span(&self) -> f32 {
        self.upper_bound - self.lower_bound
    }

    #[inline]
    pub fn center(&self) -> f32 {
        (self.upper_bound + self.lower_bound) / 2.0
    }
}

/// Dimension selector for the bounding scan.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Dim {
    X,
    Y,
}

impl Dim {
    fn name(self) -> char {
        match self {
            Dim::X => 'x',
            Dim::Y => 'y',
        }
    }

    fn pick(self, v: crate::coords::Vec2) -> f32 {
        match self {
            Dim::X => v.x,
            Dim::Y => v.y,
        }
    }
}

/// Resolves both axes for a scene.
///
/// `units` must still be in its estimating phase; pixel-unit widths and
/// radii encountered during the scan are ordering violations.
pub fn resolve_axes(
    x_spec: Option<&AxisSpec>,
    y_spec: Option<&AxisSpec>,
    objects: &[SceneObject],
    units: &UnitNormalizer,
) -> Result<(Axis, Axis), CompileError> {
    let x = resolve_one(Dim::X, x_spec, objects, units)?;
    let y = resolve_one(Dim::Y, y_spec, objects, units)?;
    Ok((x, y))
}

fn resolve_one(
    dim: Dim,
    spec: Option<&AxisSpec>,
    objects: &[SceneObject],
    units: &UnitNormalizer,
) -> Result<Axis, CompileError> {
    let (lower, upper) = match spec {
        Some(s) if s.lower_bound.is_some() && s.upper_bound.is_some() => {
            // Explicit bounds win verbatim.
            (s.lower_bound.unwrap_or_default(), s.upper_bound.unwrap_or_default())
        }
        _ => scan(dim, objects, units)?,
    };

    if !(lower.is_finite() && upper.is_finite()) {
        return Err(CompileError::UnresolvedAxis { axis: dim.name() });
    }
    if upper <= lower {
        return Err(CompileError::InvalidAxisBounds { axis: dim.name(), lower, upper });
    }

    Ok(Axis {
        lower_bound: lower,
        upper_bound: upper,
        display: spec.map(|s| s.display).unwrap_or(false),
        color: spec
            .and_then(|s| s.color)
            .map(Rgba::from_wire)
            .unwrap_or(Rgba::BLACK),
        label: spec.and_then(|s| s.label.clone()).unwrap_or_default(),
    })
}

fn scan(
    dim: Dim,
    objects: &[SceneObject],
    units: &UnitNormalizer,
) -> Result<(f32, f32), CompileError> {
    let mut lower = f32::INFINITY;
    let mut upper = f32::NEG_INFINITY;
    let mut cover = |value: f32| {
        lower = lower.min(value);
        upper = upper.max(value);
    };

    for object in objects {
        match object {
            SceneObject::Line(line) => {
                let half = units.to_world(line.width)? / 2.0;
                for p in [line.p0.pos, line.p1.pos] {
                    let v = dim.pick(p);
                    cover(v - half);
                    cover(v + half);
                }
            }
            SceneObject::Circle(circle) => {
                let r = units.to_world(circle.outer_radius)?;
                let c = dim.pick(circle.center);
                cover(c - r);
                cover(c + r);
            }
            SceneObject::Polygon(poly) => {
                for v in &poly.vertexes {
                    cover(dim.pick(v.pos));
                }
            }
            SceneObject::Curve(curve) => {
                for p in &curve.points {
                    cover(dim.pick(p.pos));
                }
            }
            // Text extent needs pixel_to_world; not available yet.
            SceneObject::Text(_) => {}
        }
    }

    Ok((lower, upper))
}

#[cfg(test)]
mod tests {
    use plotforge_protocol::{Primitive, Scene2D, Size, WireVertex};

    use crate::scene::Scene;

    use super::*;

    fn objects_of(primitives: Vec<Primitive>) -> Vec<SceneObject> {
        let scene = Scene::from_wire(&Scene2D { objects: primitives, ..Scene2D::default() })
            .unwrap();
        scene.objects
    }

    fn line(p0: [f32; 2], p1: [f32; 2], width: Size) -> Primitive {
        Primitive::Line {
            endpoints: [WireVertex::new(p0[0], p0[1]), WireVertex::new(p1[0], p1[1])],
            width: Some(width),
            fill: None,
            start_arrow: None,
            end_arrow: None,
        }
    }

    #[test]
    fn auto_range_pads_line_by_half_width() {
        let objects = objects_of(vec![line([0.0, 0.0], [10.0, 0.0], Size::World(2.0))]);
        let units = UnitNormalizer::new();
        let (x, y) = resolve_axes(None, None, &objects, &units).unwrap();
        assert_eq!((x.lower_bound, x.upper_bound), (-1.0, 11.0));
        assert_eq!((y.lower_bound, y.upper_bound), (-1.0, 1.0));
        assert!(!x.display);
    }

    #[test]
    fn circle_reserves_full_outer_bounding_box() {
        let objects = objects_of(vec![Primitive::Circle {
            center: WireVertex::new(2.0, -1.0),
            outer_radius: Size::World(3.0),
            inner_radius: Some(Size::World(2.5)),
            fill: None,
            start_angle: Some(0.0),
            end_angle: Some(0.5),
            anticlockwise: None,
            segments: None,
        }]);
        let units = UnitNormalizer::new();
        let (x, y) = resolve_axes(None, None, &objects, &units).unwrap();
        // Arc extent and inner radius are ignored on purpose.
        assert_eq!((x.lower_bound, x.upper_bound), (-1.0, 5.0));
        assert_eq!((y.lower_bound, y.upper_bound), (-4.0, 2.0));
    }

    #[test]
    fn curve_points_are_scanned() {
        let objects = objects_of(vec![Primitive::Curve {
            vertexes: vec![WireVertex::new(-2.0, 1.0), WireVertex::new(4.0, 3.0)],
            width: None,
            color: None,
        }]);
        let units = UnitNormalizer::new();
        let (x, y) = resolve_axes(None, None, &objects, &units).unwrap();
        assert_eq!((x.lower_bound, x.upper_bound), (-2.0, 4.0));
        assert_eq!((y.lower_bound, y.upper_bound), (1.0, 3.0));
    }

    #[test]
    fn text_only_scene_fails_fast() {
        let objects = objects_of(vec![Primitive::Text {
            text: "lonely".into(),
            position: [0.0, 0.0, 0.0],
            color: None,
            size: None,
            font: None,
        }]);
        let units = UnitNormalizer::new();
        let err = resolve_axes(None, None, &objects, &units).unwrap_err();
        assert_eq!(err, CompileError::UnresolvedAxis { axis: 'x' });
    }

    #[test]
    fn explicit_bounds_win_verbatim() {
        let spec = AxisSpec {
            lower_bound: Some(-5.0),
            upper_bound: Some(5.0),
            display: true,
            ..AxisSpec::default()
        };
        let objects = objects_of(vec![line([0.0, 0.0], [100.0, 0.0], Size::World(2.0))]);
        let units = UnitNormalizer::new();
        let (x, _) = resolve_axes(Some(&spec), Some(&spec), &objects, &units).unwrap();
        assert_eq!((x.lower_bound, x.upper_bound), (-5.0, 5.0));
        assert!(x.display);
    }

    #[test]
    fn inverted_explicit_bounds_are_rejected() {
        let spec = AxisSpec {
            lower_bound: Some(3.0),
            upper_bound: Some(-3.0),
            ..AxisSpec::default()
        };
        let units = UnitNormalizer::new();
        let err = resolve_axes(Some(&spec), Some(&spec), &[], &units).unwrap_err();
        assert!(matches!(err, CompileError::InvalidAxisBounds { axis: 'x', .. }));
    }

    #[test]
    fn pixel_width_during_auto_range_is_an_ordering_violation() {
        let objects = objects_of(vec![line([0.0, 0.0], [1.0, 0.0], Size::Pixels(4.0))]);
        let units = UnitNormalizer::new();
        let err = resolve_axes(None, None, &objects, &units).unwrap_err();
        assert!(matches!(err, CompileError::OrderingViolation { .. }));
    }

    #[test]
    fn partial_explicit_bounds_fall_back_to_scan() {
        let spec = AxisSpec { lower_bound: Some(-100.0), ..AxisSpec::default() };
        let objects = objects_of(vec![line([0.0, 0.0], [10.0, 0.0], Size::World(2.0))]);
        let units = UnitNormalizer::new();
        let (x, _) = resolve_axes(Some(&spec), None, &objects, &units).unwrap();
        // One missing bound rederives both from geometry.
        assert_eq!((x.lower_bound, x.upper_bound), (-1.0, 11.0));
    }
}
