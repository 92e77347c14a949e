use serde::{Deserialize, Serialize};

use figscope_core::geometry::BBox;
use figscope_core::node::{BoundingBox, Node};

/// Uniform scale plus translation mapping document coordinates to canvas
/// pixels. Recomputed from scratch on every successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Pixels per document unit. Always positive.
    pub scale: f64,
    /// Document-space X subtracted before scaling.
    pub offset_x: f64,
    /// Document-space Y subtracted before scaling.
    pub offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Fit every node's bounding box into a `canvas_width` × `canvas_height`
    /// canvas.
    ///
    /// Every node contributes, regardless of type — the same full list the
    /// render pass walks. The offsets are the union minima; the scale is
    /// chosen so the tighter axis exactly fills the canvas while preserving
    /// aspect ratio. An empty list or a zero span on either axis degrades to
    /// `scale = 1` rather than dividing by zero.
    pub fn fit(nodes: &[Node], canvas_width: f64, canvas_height: f64) -> Self {
        let mut bounds: Option<BBox> = None;
        for node in nodes {
            let nb = node.bbox();
            bounds = Some(match bounds {
                Some(b) => b.union(&nb),
                None => nb,
            });
        }

        let bounds = match bounds {
            Some(b) => b,
            None => return Self::identity(),
        };

        let span_x = bounds.width();
        let span_y = bounds.height();
        let scale = if span_x == 0.0 || span_y == 0.0 {
            1.0
        } else {
            (canvas_width / span_x).min(canvas_height / span_y)
        };

        Self {
            scale,
            offset_x: bounds.min.x,
            offset_y: bounds.min.y,
        }
    }

    /// Project a document-space box to canvas pixels.
    pub fn project(&self, bb: &BoundingBox) -> ScreenRect {
        ScreenRect {
            x: (bb.x - self.offset_x) * self.scale,
            y: (bb.y - self.offset_y) * self.scale,
            width: bb.width * self.scale,
            height: bb.height * self.scale,
        }
    }
}

/// A screen-space rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow width and height by `margin`, keeping the origin.
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            x: self.x,
            y: self.y,
            width: self.width + margin,
            height: self.height + margin,
        }
    }
}
