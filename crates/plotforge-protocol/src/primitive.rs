use serde::{Deserialize, Serialize};

use crate::size::Size;
use crate::{Coordinate, WireColor};

/// A positioned point, optionally with its own color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireVertex {
    pub xyz: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<WireColor>,
}

impl WireVertex {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { xyz: [x, y, 0.0], color: None }
    }

    #[inline]
    pub fn colored(x: f32, y: f32, color: WireColor) -> Self {
        Self { xyz: [x, y, 0.0], color: Some(color) }
    }
}

/// Endpoint decoration for line primitives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrowStyle {
    TriangleArrow,
    ShapeArrow,
    Circle,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowSpec {
    pub style: ArrowStyle,
    /// Arrow length; defaults depend on the style (see the engine docs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<WireColor>,
}

/// Per-edge border of a polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireBorder {
    pub width: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<WireColor>,
}

/// Drawable scene object. Closed set; the engine dispatches on it with one
/// exhaustive match, so adding a variant is a compile-time checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    #[serde(rename_all = "camelCase")]
    Line {
        endpoints: [WireVertex; 2],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<Size>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<WireColor>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_arrow: Option<ArrowSpec>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_arrow: Option<ArrowSpec>,
    },
    #[serde(rename_all = "camelCase")]
    Circle {
        center: WireVertex,
        outer_radius: Size,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inner_radius: Option<Size>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<WireColor>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start_angle: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_angle: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        anticlockwise: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        segments: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    Polygon {
        vertexes: Vec<WireVertex>,
        /// One entry per edge; `null` entries mean "no border on this edge".
        #[serde(default, skip_serializing_if = "Option::is_none")]
        borders: Option<Vec<Option<WireBorder>>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<WireColor>,
    },
    #[serde(rename_all = "camelCase")]
    Curve {
        vertexes: Vec<WireVertex>,
        /// Stroke width in world units; defaults to one pixel.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<WireColor>,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        position: Coordinate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<WireColor>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<Size>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font: Option<String>,
    },
}

impl Primitive {
    /// Axis-aligned rectangle as a 4-vertex polygon (arity-fixed helper).
    pub fn rectangle(min: [f32; 2], max: [f32; 2], fill: Option<WireColor>) -> Self {
        Primitive::Polygon {
            vertexes: vec![
                WireVertex::new(min[0], min[1]),
                WireVertex::new(max[0], min[1]),
                WireVertex::new(max[0], max[1]),
                WireVertex::new(min[0], max[1]),
            ],
            borders: None,
            fill,
        }
    }

    /// Triangle as a 3-vertex polygon (arity-fixed helper).
    pub fn triangle(a: [f32; 2], b: [f32; 2], c: [f32; 2], fill: Option<WireColor>) -> Self {
        Primitive::Polygon {
            vertexes: vec![
                WireVertex::new(a[0], a[1]),
                WireVertex::new(b[0], b[1]),
                WireVertex::new(c[0], c[1]),
            ],
            borders: None,
            fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_helper_is_ccw_quad() {
        let Primitive::Polygon { vertexes, .. } =
            Primitive::rectangle([0.0, 0.0], [2.0, 1.0], None)
        else {
            panic!("expected polygon");
        };
        assert_eq!(vertexes.len(), 4);
        assert_eq!(vertexes[2].xyz, [2.0, 1.0, 0.0]);
    }

    #[test]
    fn arrow_style_wire_names() {
        assert_eq!(
            serde_json::to_string(&ArrowStyle::TriangleArrow).unwrap(),
            r#""triangle-arrow""#
        );
        assert_eq!(serde_json::to_string(&ArrowStyle::None).unwrap(), r#""none""#);
    }
}
