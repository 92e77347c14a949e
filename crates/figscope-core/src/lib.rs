//! # Figscope Core
//!
//! Document model for the Figscope previewer: geometric primitives, the
//! drawable node snapshot parsed from a Figma file, and the document
//! container that owns one fetch's worth of nodes.

pub mod geometry;
pub mod node;
pub mod document;

pub use document::Document;
pub use geometry::{BBox, Point};
pub use node::{BoundingBox, FillColor, FontStyle, Node, NodeType, ShapeType};
