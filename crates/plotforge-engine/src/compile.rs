//! Scene-to-geometry compiler.
//!
//! Responsibilities:
//! - run axis resolution, then flip the unit normalizer to its resolved
//!   phase with `pixel_to_world = x_span / canvas_width`
//! - emit scene decorations (grid, ticks, axis lines and labels) as
//!   synthetic primitives through the regular tessellators
//! - dispatch every scene object to its tessellator, in render order
//! - apply the final world-to-NDC rescale over the whole buffer, exactly
//!   once, and pack the GPU vertex streams
//!
//! A compiler is constructed fresh per render and consumed by
//! [`SceneCompiler::compile`]; it owns its buffers and transform context
//! exclusively. Only the glyph atlas outlives the call.

use std::time::Instant;

use plotforge_protocol::{RenderTask, Size};

use crate::atlas::{FontStore, GlyphAtlas, ATLAS_LAYERS};
use crate::axis::{resolve_axes, Axis};
use crate::buffers::VertexStreams;
use crate::coords::Vec2;
use crate::error::CompileError;
use crate::paint::Rgba;
use crate::scene::{Arrow, ArrowKind, Line, Scene, SceneObject, ScenePoint, Text};
use crate::tess::{
    tessellate_circle, tessellate_curve, tessellate_line, tessellate_polygon, tessellate_text,
    GeometryBuf,
};
use crate::units::UnitNormalizer;

/// Target canvas size in pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// Compiler construction options.
#[derive(Debug, Copy, Clone, Default)]
pub struct CompileConfig {
    /// Log per-phase timings at debug level.
    pub perf_monitoring: bool,
}

/// Per-render coordinate context, immutable once axis resolution is done.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformContext {
    pub x_scale: f32,
    pub x_offset: f32,
    pub y_scale: f32,
    pub y_offset: f32,
    pub pixel_to_world: f32,
    pub world_to_pixel: f32,
}

/// Output of one successful compile: everything the GPU layer needs.
#[derive(Debug)]
pub struct CompiledScene {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub background: Rgba,
    pub transform: TransformContext,
    pub geometry: GeometryBuf,
    pub streams: VertexStreams,
    /// RGBA bytes of the four atlas layers, snapshotted after tessellation.
    pub atlas_layers: [Vec<u8>; ATLAS_LAYERS],
}

const GRID_DIVISIONS: u32 = 10;
const TICK_LENGTH_PX: f32 = 8.0;
const AXIS_ARROW_PX: f32 = 8.0;
const LABEL_SIZE_PX: f32 = 16.0;
const LABEL_GAP_PX: f32 = 4.0;

fn grid_color() -> Rgba {
    // #8d8d8d
    Rgba::from_u8(141, 141, 141, 1.0)
}

/// One-shot scene compiler. Borrows the session font store and glyph atlas;
/// everything else is per-call state.
pub struct SceneCompiler<'a> {
    canvas: CanvasSize,
    config: CompileConfig,
    fonts: &'a FontStore,
    atlas: &'a mut GlyphAtlas,
}

impl<'a> SceneCompiler<'a> {
    pub fn new(
        canvas: CanvasSize,
        config: CompileConfig,
        fonts: &'a FontStore,
        atlas: &'a mut GlyphAtlas,
    ) -> Self {
        Self { canvas, config, fonts, atlas }
    }

    pub fn compile(mut self, task: &RenderTask) -> Result<CompiledScene, CompileError> {
        let started = Instant::now();
        let wire = task.scene2d.as_ref().ok_or(CompileError::MissingScene)?;
        let scene = Scene::from_wire(wire)?;

        let mut units = UnitNormalizer::new();
        let (x_axis, y_axis) =
            resolve_axes(scene.x_axis.as_ref(), scene.y_axis.as_ref(), &scene.objects, &units)?;

        let pixel_to_world = x_axis.span() / self.canvas.width as f32;
        units.resolve(pixel_to_world);

        let transform = TransformContext {
            x_scale: 2.0 / x_axis.span(),
            x_offset: x_axis.center(),
            y_scale: 2.0 / y_axis.span(),
            y_offset: y_axis.center(),
            pixel_to_world,
            world_to_pixel: 1.0 / pixel_to_world,
        };
        let resolved_at = Instant::now();

        let mut buf = GeometryBuf::new();

        if scene.grid {
            self.emit_grid(&mut buf, &x_axis, &y_axis, &units)?;
        }
        if scene.tick {
            self.emit_ticks(&mut buf, &x_axis, &y_axis, &units)?;
        }
        self.emit_axes(&mut buf, &x_axis, &y_axis, &units)?;

        for object in &scene.objects {
            match object {
                SceneObject::Line(line) => tessellate_line(&mut buf, line, &units)?,
                SceneObject::Circle(circle) => tessellate_circle(&mut buf, circle, &units)?,
                SceneObject::Polygon(poly) => tessellate_polygon(&mut buf, poly, &units)?,
                SceneObject::Curve(curve) => tessellate_curve(&mut buf, curve, &units)?,
                SceneObject::Text(text) => {
                    tessellate_text(&mut buf, text, &units, self.fonts, self.atlas)?
                }
            }
        }

        buf.rescale(transform.x_offset, transform.x_scale, transform.y_offset, transform.y_scale);
        let streams = VertexStreams::pack(&buf);
        let atlas_layers = self.atlas.snapshot_layers();

        if self.config.perf_monitoring {
            log::debug!(
                "compiled {} objects: {} vertices, {} triangles (resolve {:?}, tessellate {:?})",
                scene.objects.len(),
                buf.vertex_count(),
                buf.triangle_count(),
                resolved_at - started,
                resolved_at.elapsed(),
            );
        }

        Ok(CompiledScene {
            x_axis,
            y_axis,
            background: scene.background,
            transform,
            geometry: buf,
            streams,
            atlas_layers,
        })
    }

    /// 11×11 one-pixel grid lines across the resolved axis box.
    fn emit_grid(
        &self,
        buf: &mut GeometryBuf,
        x: &Axis,
        y: &Axis,
        units: &UnitNormalizer,
    ) -> Result<(), CompileError> {
        let one_pixel = Size::Pixels(1.0);
        let x_step = x.span() / GRID_DIVISIONS as f32;
        let y_step = y.span() / GRID_DIVISIONS as f32;

        for i in 0..=GRID_DIVISIONS {
            let gx = x.lower_bound + i as f32 * x_step;
            let line = synthetic_line(
                Vec2::new(gx, y.lower_bound),
                Vec2::new(gx, y.upper_bound),
                one_pixel,
                grid_color(),
                None,
            );
            tessellate_line(buf, &line, units)?;
        }
        for i in 0..=GRID_DIVISIONS {
            let gy = y.lower_bound + i as f32 * y_step;
            let line = synthetic_line(
                Vec2::new(x.lower_bound, gy),
                Vec2::new(x.upper_bound, gy),
                one_pixel,
                grid_color(),
                None,
            );
            tessellate_line(buf, &line, units)?;
        }
        Ok(())
    }

    /// Short black ticks along each displayed axis, at the grid divisions.
    fn emit_ticks(
        &self,
        buf: &mut GeometryBuf,
        x: &Axis,
        y: &Axis,
        units: &UnitNormalizer,
    ) -> Result<(), CompileError> {
        let one_pixel = Size::Pixels(1.0);
        let tick_len = units.to_world(Size::Pixels(TICK_LENGTH_PX))?;
        let x_step = x.span() / GRID_DIVISIONS as f32;
        let y_step = y.span() / GRID_DIVISIONS as f32;

        if x.display {
            for i in 0..=GRID_DIVISIONS {
                let gx = x.lower_bound + i as f32 * x_step;
                let line = synthetic_line(
                    Vec2::new(gx, 0.0),
                    Vec2::new(gx, tick_len),
                    one_pixel,
                    Rgba::BLACK,
                    None,
                );
                tessellate_line(buf, &line, units)?;
            }
        }
        if y.display {
            for i in 0..=GRID_DIVISIONS {
                let gy = y.lower_bound + i as f32 * y_step;
                let line = synthetic_line(
                    Vec2::new(0.0, gy),
                    Vec2::new(tick_len, gy),
                    one_pixel,
                    Rgba::BLACK,
                    None,
                );
                tessellate_line(buf, &line, units)?;
            }
        }
        Ok(())
    }

    /// Arrowed axis lines through the origin, plus optional labels.
    fn emit_axes(
        &mut self,
        buf: &mut GeometryBuf,
        x: &Axis,
        y: &Axis,
        units: &UnitNormalizer,
    ) -> Result<(), CompileError> {
        let one_pixel = Size::Pixels(1.0);
        let arrow = Some(Arrow {
            kind: ArrowKind::Triangle,
            size: Some(Size::Pixels(AXIS_ARROW_PX)),
        });
        let text_size = units.to_world(Size::Pixels(LABEL_SIZE_PX))?;
        let gap = units.to_world(Size::Pixels(LABEL_GAP_PX))?;

        if x.display {
            if !x.label.is_empty() && y.upper_bound > 0.0 {
                // Hug the arrow tip, above or below the axis depending on
                // where the vertical midline sits.
                let above = y.center() >= 0.0;
                let position = Vec2::new(
                    x.upper_bound - x.label.chars().count() as f32 * text_size - gap,
                    if above { gap + text_size } else { -gap },
                );
                self.emit_label(buf, &x.label, position, text_size, units)?;
            }
            let line = synthetic_line(
                Vec2::new(x.lower_bound, 0.0),
                Vec2::new(x.upper_bound, 0.0),
                one_pixel,
                x.color,
                arrow.clone(),
            );
            tessellate_line(buf, &line, units)?;
        }

        if y.display {
            if !y.label.is_empty() && x.upper_bound > 0.0 {
                let right = x.center() >= 0.0;
                let position = Vec2::new(
                    if right {
                        gap
                    } else {
                        -(gap + text_size * y.label.chars().count() as f32)
                    },
                    y.upper_bound - text_size,
                );
                self.emit_label(buf, &y.label, position, text_size, units)?;
            }
            let line = synthetic_line(
                Vec2::new(0.0, y.lower_bound),
                Vec2::new(0.0, y.upper_bound),
                one_pixel,
                y.color,
                arrow,
            );
            tessellate_line(buf, &line, units)?;
        }
        Ok(())
    }

    fn emit_label(
        &mut self,
        buf: &mut GeometryBuf,
        label: &str,
        position: Vec2,
        text_size: f32,
        units: &UnitNormalizer,
    ) -> Result<(), CompileError> {
        let text = Text {
            content: label.to_owned(),
            position,
            font: crate::scene::DEFAULT_FONT.to_owned(),
            size: Size::World(text_size),
            color: Rgba::BLACK,
        };
        tessellate_text(buf, &text, units, self.fonts, self.atlas)
    }
}

/// Builds a decoration stroke with both endpoints in one color.
fn synthetic_line(
    p0: Vec2,
    p1: Vec2,
    width: Size,
    color: Rgba,
    end_arrow: Option<Arrow>,
) -> Line {
    Line {
        p0: ScenePoint { pos: p0, color: Some(color) },
        p1: ScenePoint { pos: p1, color: Some(color) },
        width,
        fill: color,
        start_arrow: None,
        end_arrow,
    }
}

#[cfg(test)]
mod tests {
    use plotforge_protocol::{AxisSpec, Primitive, Scene2D, SceneType, WireVertex};

    use super::*;

    const CANVAS: CanvasSize = CanvasSize { width: 100, height: 100 };

    fn compile(scene: Scene2D) -> Result<CompiledScene, CompileError> {
        let fonts = FontStore::new();
        let mut atlas = GlyphAtlas::new();
        let compiler =
            SceneCompiler::new(CANVAS, CompileConfig::default(), &fonts, &mut atlas);
        compiler.compile(&RenderTask::scene(scene))
    }

    fn world_line(p0: [f32; 2], p1: [f32; 2], width: Size) -> Primitive {
        Primitive::Line {
            endpoints: [WireVertex::new(p0[0], p0[1]), WireVertex::new(p1[0], p1[1])],
            width: Some(width),
            fill: None,
            start_arrow: None,
            end_arrow: None,
        }
    }

    fn spanning_axis(lower: f32, upper: f32) -> AxisSpec {
        AxisSpec { lower_bound: Some(lower), upper_bound: Some(upper), ..AxisSpec::default() }
    }

    #[test]
    fn missing_scene_payload_is_rejected() {
        let fonts = FontStore::new();
        let mut atlas = GlyphAtlas::new();
        let compiler =
            SceneCompiler::new(CANVAS, CompileConfig::default(), &fonts, &mut atlas);
        let task = RenderTask { scene_type: SceneType::TwoD, scene2d: None, figure_size: None };
        assert_eq!(compiler.compile(&task).unwrap_err(), CompileError::MissingScene);
    }

    #[test]
    fn output_is_normalized_to_the_axis_box() {
        let scene = Scene2D {
            objects: vec![world_line([0.0, 0.0], [10.0, 0.0], Size::World(2.0))],
            ..Scene2D::default()
        };
        let compiled = compile(scene).unwrap();
        // Auto-ranged bounds: x [-1, 11], y [-1, 1].
        assert_eq!(compiled.x_axis.lower_bound, -1.0);
        assert_eq!(compiled.x_axis.upper_bound, 11.0);

        // The shaft quad's world corners (0, ±1) and (10, ±1) land at
        // x' = (x − 5)/6, y' = ±1.
        let xs: Vec<f32> = compiled.geometry.vertexes.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = compiled.geometry.vertexes.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().any(|&v| (v - (-5.0 / 6.0)).abs() < 1e-5));
        assert!(xs.iter().any(|&v| (v - 5.0 / 6.0).abs() < 1e-5));
        assert!(ys.iter().all(|&v| v.abs() <= 1.0 + 1e-5));
        // Everything inside the NDC box.
        assert!(xs.iter().all(|&v| v.abs() <= 1.0 + 1e-5));
    }

    #[test]
    fn axis_center_maps_to_zero_and_bound_to_one() {
        let scene = Scene2D {
            x_axis: Some(spanning_axis(-2.0, 6.0)),
            y_axis: Some(spanning_axis(-3.0, 3.0)),
            // A polygon with a corner exactly at the x center (2) and one
            // at the x upper bound (6).
            objects: vec![Primitive::Polygon {
                vertexes: vec![
                    WireVertex::new(2.0, 0.0),
                    WireVertex::new(6.0, 0.0),
                    WireVertex::new(2.0, 3.0),
                ],
                borders: None,
                fill: None,
            }],
            ..Scene2D::default()
        };
        let compiled = compile(scene).unwrap();
        let v = &compiled.geometry.vertexes;
        assert_eq!(v[0].position[..2], [0.0, 0.0]);
        assert_eq!(v[1].position[0], 1.0);
        assert_eq!(v[2].position[1], 1.0);
    }

    #[test]
    fn pixel_width_without_explicit_bounds_is_an_ordering_violation() {
        let scene = Scene2D {
            objects: vec![world_line([0.0, 0.0], [10.0, 0.0], Size::Pixels(4.0))],
            ..Scene2D::default()
        };
        let err = compile(scene).unwrap_err();
        assert!(matches!(err, CompileError::OrderingViolation { .. }));
    }

    #[test]
    fn pixel_width_with_explicit_bounds_resolves() {
        let scene = Scene2D {
            x_axis: Some(spanning_axis(0.0, 100.0)),
            y_axis: Some(spanning_axis(-50.0, 50.0)),
            objects: vec![world_line([10.0, 0.0], [90.0, 0.0], Size::Pixels(4.0))],
            ..Scene2D::default()
        };
        let compiled = compile(scene).unwrap();
        // 100 world units over 100 px: one pixel is one world unit, so a
        // 4px stroke is 4 world units, i.e. ±2 around the line. In NDC the
        // half-width becomes 2 · (2/100) = 0.04.
        assert_eq!(compiled.transform.pixel_to_world, 1.0);
        let ys: Vec<f32> = compiled.geometry.vertexes.iter().map(|v| v.position[1]).collect();
        assert!(ys.iter().any(|&v| (v - 0.04).abs() < 1e-6));
        assert!(ys.iter().any(|&v| (v + 0.04).abs() < 1e-6));
    }

    #[test]
    fn grid_is_eleven_lines_each_way() {
        let scene = Scene2D {
            x_axis: Some(spanning_axis(0.0, 10.0)),
            y_axis: Some(spanning_axis(0.0, 10.0)),
            grid: true,
            ..Scene2D::default()
        };
        let compiled = compile(scene).unwrap();
        // 22 one-quad strokes, nothing else in the scene.
        assert_eq!(compiled.geometry.triangle_count(), 44);
    }

    #[test]
    fn displayed_axis_adds_ticks_and_arrowed_line() {
        let scene = Scene2D {
            x_axis: Some(AxisSpec { display: true, ..spanning_axis(-5.0, 5.0) }),
            y_axis: Some(spanning_axis(-5.0, 5.0)),
            tick: true,
            ..Scene2D::default()
        };
        let compiled = compile(scene).unwrap();
        // 11 tick quads + axis shaft quad + arrowhead triangle.
        assert_eq!(compiled.geometry.triangle_count(), 11 * 2 + 2 + 1);
    }

    #[test]
    fn compiled_scene_is_debug_printable() {
        // Results carrying a CompiledScene must support unwrap_err/Debug
        // in assertions and logs.
        let scene = Scene2D {
            x_axis: Some(spanning_axis(0.0, 1.0)),
            y_axis: Some(spanning_axis(0.0, 1.0)),
            ..Scene2D::default()
        };
        let result = compile(scene);
        let rendered = format!("{result:?}");
        assert!(rendered.contains("CompiledScene"));
    }

    #[test]
    fn background_defaults_to_transparent_white() {
        let scene = Scene2D {
            x_axis: Some(spanning_axis(0.0, 1.0)),
            y_axis: Some(spanning_axis(0.0, 1.0)),
            ..Scene2D::default()
        };
        let compiled = compile(scene).unwrap();
        assert_eq!(compiled.background, Rgba::new(1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn compiles_a_json_task_end_to_end() {
        let task: RenderTask = serde_json::from_str(
            r#"{
                "sceneType": "2D",
                "scene2D": {
                    "xAxis": { "lowerBound": 0, "upperBound": 10 },
                    "yAxis": { "lowerBound": -5, "upperBound": 5 },
                    "objects": [
                        { "type": "polygon",
                          "vertexes": [
                              { "xyz": [1, 1, 0] },
                              { "xyz": [9, 1, 0] },
                              { "xyz": [9, 4, 0] },
                              { "xyz": [1, 4, 0] }
                          ] },
                        { "type": "line",
                          "endpoints": [{ "xyz": [0, -5, 0] }, { "xyz": [10, 5, 0] }],
                          "width": "2px" }
                    ]
                }
            }"#,
        )
        .unwrap();

        let fonts = FontStore::new();
        let mut atlas = GlyphAtlas::new();
        let compiler =
            SceneCompiler::new(CANVAS, CompileConfig::default(), &fonts, &mut atlas);
        let compiled = compiler.compile(&task).unwrap();

        // Rectangle fan (2) + line shaft quad (2).
        assert_eq!(compiled.geometry.triangle_count(), 4);
        assert!(compiled
            .geometry
            .vertexes
            .iter()
            .all(|v| v.position[0].is_finite() && v.position[1].is_finite()));
    }

    #[test]
    fn streams_are_packed_from_the_final_geometry() {
        let scene = Scene2D {
            objects: vec![world_line([0.0, 0.0], [10.0, 0.0], Size::World(2.0))],
            ..Scene2D::default()
        };
        let compiled = compile(scene).unwrap();
        let n = compiled.geometry.vertex_count();
        assert_eq!(compiled.streams.stream_a_bytes().len(), n * 40);
        assert_eq!(compiled.streams.stream_b_bytes().len(), n * 8);
        assert_eq!(compiled.streams.index_count() as usize, compiled.geometry.indices.len());
    }
}
