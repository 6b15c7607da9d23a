use plotforge_protocol::{Primitive, Size};

use crate::error::CompileError;
use crate::paint::Rgba;

use super::ScenePoint;

/// Border drawn along one polygon edge, mitered at the corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: Size,
    pub color: Rgba,
}

/// Fan-triangulated polygon with optional per-edge borders.
///
/// Triangulation is a simple fan from vertex 0, so the shape must be convex
/// or star-shaped as seen from that vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertexes: Vec<ScenePoint>,
    /// One slot per edge (edge `i` runs from vertex `i` to `i+1`, cyclic).
    /// `None` or zero-width slots draw no border on that edge.
    pub borders: Vec<Option<Border>>,
    pub fill: Rgba,
}

impl Polygon {
    pub(crate) fn from_wire(primitive: &Primitive) -> Result<Self, CompileError> {
        let Primitive::Polygon { vertexes, borders, fill } = primitive else {
            unreachable!("dispatched on tag");
        };

        if vertexes.len() < 3 {
            return Err(CompileError::ShapeArity {
                shape: "polygon",
                needed: 3,
                got: vertexes.len(),
            });
        }

        let mut edge_borders: Vec<Option<Border>> = borders
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|slot| {
                slot.as_ref().map(|b| Border {
                    width: b.width,
                    color: super::color_or_black(b.color),
                })
            })
            .collect();
        edge_borders.resize(vertexes.len(), None);

        Ok(Self {
            vertexes: vertexes.iter().map(ScenePoint::from_wire).collect(),
            borders: edge_borders,
            fill: super::color_or_black(*fill),
        })
    }

    /// Borderless polygon, for building test fixtures without wire decode.
    #[cfg(test)]
    pub(crate) fn solid(vertexes: Vec<ScenePoint>, fill: Rgba) -> Self {
        let n = vertexes.len();
        Self { vertexes, borders: vec![None; n], fill }
    }

    pub fn has_border(&self) -> bool {
        self.borders.iter().any(|b| b.is_some())
    }
}

#[cfg(test)]
mod tests {
    use plotforge_protocol::{Primitive, WireVertex};

    use super::*;

    #[test]
    fn two_vertexes_is_an_arity_error() {
        let wire = Primitive::Polygon {
            vertexes: vec![WireVertex::new(0.0, 0.0), WireVertex::new(1.0, 0.0)],
            borders: None,
            fill: None,
        };
        let err = Polygon::from_wire(&wire).unwrap_err();
        assert_eq!(err, CompileError::ShapeArity { shape: "polygon", needed: 3, got: 2 });
    }

    #[test]
    fn border_list_is_padded_to_edge_count() {
        let wire = Primitive::Polygon {
            vertexes: vec![
                WireVertex::new(0.0, 0.0),
                WireVertex::new(1.0, 0.0),
                WireVertex::new(1.0, 1.0),
                WireVertex::new(0.0, 1.0),
            ],
            borders: Some(vec![Some(plotforge_protocol::WireBorder {
                width: Size::World(0.1),
                color: None,
            })]),
            fill: None,
        };
        let poly = Polygon::from_wire(&wire).unwrap();
        assert_eq!(poly.borders.len(), 4);
        assert!(poly.borders[0].is_some());
        assert!(poly.borders[1].is_none());
        assert!(poly.has_border());
    }
}
