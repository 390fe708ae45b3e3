// File: crates/easel-core/src/scene.rs
// Summary: Renderer-agnostic scene graph produced by chart views.

use crate::color::Rgba;
use crate::geometry::RectF;

/// Text anchor along the x direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Debug)]
pub enum Node {
    Rect {
        rect: RectF,
        fill: Rgba,
        stroke: Option<Rgba>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Rgba,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Rgba,
        width: f64,
    },
    /// Polyline through `points`, open unless `fill` is set.
    Path {
        points: Vec<(f64, f64)>,
        stroke: Rgba,
        width: f64,
        fill: Option<Rgba>,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        size: f64,
        fill: Rgba,
        anchor: Anchor,
        /// Rotation in degrees about the text anchor point.
        rotate: Option<f64>,
    },
    /// Translated subtree (the margin transform).
    Group {
        dx: f64,
        dy: f64,
        children: Vec<Node>,
    },
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Rgba,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: Rgba) -> Self {
        Self { width, height, background, nodes: Vec::new() }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }
}
