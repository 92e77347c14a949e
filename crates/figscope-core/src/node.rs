use serde::{Deserialize, Serialize};

use crate::geometry::BBox;

/// Semantic kind of a drawable node.
///
/// Unknown wire tags map to `Other`; such nodes stay in the document (they
/// participate in the viewport fit) but the renderer never draws them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Rectangle,
    Text,
    ShapeWithText,
    Other,
}

impl NodeType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "RECTANGLE" => NodeType::Rectangle,
            "TEXT" => NodeType::Text,
            "SHAPE_WITH_TEXT" => NodeType::ShapeWithText,
            _ => NodeType::Other,
        }
    }
}

/// Shape tag carried by SHAPE_WITH_TEXT (and occasionally RECTANGLE) nodes.
///
/// `Other` is the unhandled arm: a tag that was present on the wire but is
/// not one we draw. Absence of a tag altogether is `None` on the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeType {
    Ellipse,
    Square,
    RoundedRectangle,
    TriangleDown,
    ParallelogramLeft,
    ParallelogramRight,
    Other,
}

impl ShapeType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ELLIPSE" => ShapeType::Ellipse,
            "SQUARE" => ShapeType::Square,
            "ROUNDED_RECTANGLE" => ShapeType::RoundedRectangle,
            "TRIANGLE_DOWN" => ShapeType::TriangleDown,
            "PARALLELOGRAM_LEFT" => ShapeType::ParallelogramLeft,
            "PARALLELOGRAM_RIGHT" => ShapeType::ParallelogramRight,
            _ => ShapeType::Other,
        }
    }
}

/// Node extents in document coordinates. Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bbox(&self) -> BBox {
        BBox::from_rect(self.x, self.y, self.width, self.height)
    }
}

/// Solid fill color, channels in [0, 1] as delivered by the Figma API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl FillColor {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// RGBA array for the paint ops. Alpha is carried through.
    pub fn to_f32_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Font selection for TEXT nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    pub family: String,
    pub size: f64,
}

/// One drawable element of the fetched document.
///
/// Immutable snapshot: nodes are replaced wholesale on each successful
/// fetch and never mutated in place. Optional fields stay optional here;
/// the renderer decides per node type which of them are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub node_type: NodeType,
    pub shape_type: Option<ShapeType>,
    pub bounding_box: BoundingBox,
    pub fill: Option<FillColor>,
    pub characters: Option<String>,
    pub font: Option<FontStyle>,
}

impl Node {
    pub fn bbox(&self) -> BBox {
        self.bounding_box.bbox()
    }
}
