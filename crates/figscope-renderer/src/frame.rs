use serde::{Deserialize, Serialize};
use thiserror::Error;

use figscope_core::geometry::Point;
use figscope_core::node::{FontStyle, Node, NodeType, ShapeType};

use crate::viewport::{ScreenRect, ViewTransform};

/// Corner radius for rounded rectangles, in canvas pixels.
pub const CORNER_RADIUS: f64 = 15.0;
/// Extra width/height given to text boxes so glyphs are not clipped.
pub const TEXT_BOX_MARGIN: f64 = 20.0;
/// Label color painted over shape fills.
pub const LABEL_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Canvas background.
pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

const PLACEHOLDER_TEXT: &str = "No objects";

/// A single node failed to render. Never aborts the pass; the frame builder
/// logs it and moves on to the next node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("node {0} has no solid fill")]
    MissingFill(String),

    #[error("node {0} has no text content")]
    MissingText(String),

    #[error("node {0} has no font style")]
    MissingFont(String),
}

/// One drawing primitive, ready for the frontend canvas.
///
/// Coordinates are canvas pixels; colors are RGBA in [0, 1]. Text ops carry
/// the string and (for TEXT nodes) the requested font — glyph rasterization
/// is the canvas side's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaintOp {
    Rect {
        rect: ScreenRect,
        color: [f32; 4],
    },
    RoundedRect {
        rect: ScreenRect,
        radius: f64,
        color: [f32; 4],
    },
    Ellipse {
        rect: ScreenRect,
        color: [f32; 4],
    },
    Polygon {
        points: Vec<Point>,
        color: [f32; 4],
    },
    Text {
        rect: ScreenRect,
        text: String,
        color: [f32; 4],
        font: Option<FontStyle>,
    },
}

/// Complete paint pass output sent to the frontend canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub background: [f32; 4],
    pub ops: Vec<PaintOp>,
}

impl RenderFrame {
    pub fn empty(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            canvas_width,
            canvas_height,
            background: BACKGROUND,
            ops: Vec::new(),
        }
    }
}

/// Render one node into paint ops under the given transform.
///
/// Nodes of an unhandled type produce no ops and no error. A node whose type
/// requires a field it lacks produces a `RenderError` naming the node.
pub fn render_node(node: &Node, transform: &ViewTransform) -> Result<Vec<PaintOp>, RenderError> {
    let rect = transform.project(&node.bounding_box);

    match node.node_type {
        NodeType::Text => {
            let color = solid_fill(node)?;
            let text = text_content(node)?;
            let font = node
                .font
                .clone()
                .ok_or_else(|| RenderError::MissingFont(node.id.clone()))?;
            Ok(vec![PaintOp::Text {
                rect: rect.expanded(TEXT_BOX_MARGIN),
                text: text.trim().to_string(),
                color,
                font: Some(font),
            }])
        }

        NodeType::Rectangle => {
            let color = solid_fill(node)?;
            let mut ops = Vec::new();
            match node.shape_type {
                None => ops.push(PaintOp::Rect { rect, color }),
                Some(ShapeType::RoundedRectangle) => ops.push(PaintOp::RoundedRect {
                    rect,
                    radius: CORNER_RADIUS,
                    color,
                }),
                // a shape tag we don't draw on a plain rectangle: nothing
                Some(_) => {}
            }
            Ok(ops)
        }

        NodeType::ShapeWithText => {
            let color = solid_fill(node)?;
            let text = text_content(node)?.to_string();
            let mut ops = Vec::new();
            match node.shape_type {
                Some(ShapeType::Ellipse) => ops.push(PaintOp::Ellipse { rect, color }),
                Some(ShapeType::Square) | Some(ShapeType::RoundedRectangle) => {
                    ops.push(PaintOp::RoundedRect {
                        rect,
                        radius: CORNER_RADIUS,
                        color,
                    });
                }
                Some(ShapeType::TriangleDown) => ops.push(PaintOp::Polygon {
                    points: triangle_down(&rect),
                    color,
                }),
                Some(ShapeType::ParallelogramRight) => ops.push(PaintOp::Polygon {
                    points: parallelogram_right(&rect),
                    color,
                }),
                Some(ShapeType::ParallelogramLeft) => ops.push(PaintOp::Polygon {
                    points: parallelogram_left(&rect),
                    color,
                }),
                // unhandled or missing tag: no primitive, label still drawn
                Some(ShapeType::Other) | None => {}
            }
            ops.push(PaintOp::Text {
                rect,
                text,
                color: LABEL_COLOR,
                font: None,
            });
            Ok(ops)
        }

        NodeType::Other => Ok(Vec::new()),
    }
}

/// One full paint pass over the node list.
///
/// Failures are isolated per node: a bad node is logged and skipped, never
/// blanking the rest of the canvas. An empty list paints the placeholder.
pub fn build_frame(
    nodes: &[Node],
    transform: &ViewTransform,
    canvas_width: f64,
    canvas_height: f64,
) -> RenderFrame {
    let mut frame = RenderFrame::empty(canvas_width, canvas_height);

    if nodes.is_empty() {
        frame.ops.push(PaintOp::Text {
            rect: ScreenRect::new(0.0, 0.0, canvas_width, canvas_height),
            text: PLACEHOLDER_TEXT.to_string(),
            color: LABEL_COLOR,
            font: None,
        });
        return frame;
    }

    for node in nodes {
        match render_node(node, transform) {
            Ok(ops) => frame.ops.extend(ops),
            Err(e) => log::warn!("skipping node: {}", e),
        }
    }
    frame
}

fn solid_fill(node: &Node) -> Result<[f32; 4], RenderError> {
    node.fill
        .map(|f| f.to_f32_array())
        .ok_or_else(|| RenderError::MissingFill(node.id.clone()))
}

fn text_content(node: &Node) -> Result<&str, RenderError> {
    node.characters
        .as_deref()
        .ok_or_else(|| RenderError::MissingText(node.id.clone()))
}

fn triangle_down(r: &ScreenRect) -> Vec<Point> {
    vec![
        Point::new(r.x, r.y),
        Point::new(r.x + r.width, r.y),
        Point::new(r.x + r.width / 2.0, r.y + r.height),
    ]
}

fn parallelogram_right(r: &ScreenRect) -> Vec<Point> {
    vec![
        Point::new(r.x + r.width / 5.0, r.y),
        Point::new(r.x + r.width, r.y),
        Point::new(r.x + 4.0 * r.width / 5.0, r.y + r.height),
        Point::new(r.x, r.y + r.height),
    ]
}

fn parallelogram_left(r: &ScreenRect) -> Vec<Point> {
    vec![
        Point::new(r.x, r.y),
        Point::new(r.x + 4.0 * r.width / 5.0, r.y),
        Point::new(r.x + r.width, r.y + r.height),
        Point::new(r.x + r.width / 5.0, r.y + r.height),
    ]
}
