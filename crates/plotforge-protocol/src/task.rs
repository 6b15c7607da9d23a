use serde::{Deserialize, Serialize};

use crate::primitive::Primitive;
use crate::WireColor;

/// Scene dimensionality tag. Only 2D scenes carry a payload today.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum SceneType {
    #[serde(rename = "2D")]
    TwoD,
    #[serde(rename = "3D")]
    ThreeD,
}

/// Requested axis configuration. Bounds left unset are derived by the
/// engine from the scene geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f32>,
    #[serde(default)]
    pub display: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<WireColor>,
}

/// A complete 2D scene: axes, decorations and an ordered object list.
///
/// Object order is render order (painter's algorithm, no depth sorting).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene2D {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<AxisSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<AxisSpec>,
    #[serde(default)]
    pub grid: bool,
    #[serde(default)]
    pub tick: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<WireColor>,
    #[serde(default)]
    pub objects: Vec<Primitive>,
}

/// Top-level unit of work shipped from a producer to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTask {
    pub scene_type: SceneType,
    #[serde(rename = "scene2D", default, skip_serializing_if = "Option::is_none")]
    pub scene2d: Option<Scene2D>,
    /// Producer's canvas-size hint in pixels; the renderer's actual canvas wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figure_size: Option<[f32; 2]>,
}

impl RenderTask {
    /// Wraps a scene in a 2D task.
    pub fn scene(scene: Scene2D) -> Self {
        Self { scene_type: SceneType::TwoD, scene2d: Some(scene), figure_size: None }
    }
}
