use serde::{Deserialize, Serialize};

use crate::node::Node;

/// One successfully fetched Figma file: metadata plus the flat list of
/// top-level drawable nodes from the first page.
///
/// A document is installed wholesale and never edited; the next successful
/// fetch replaces it entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// File name as reported by the Figma API.
    pub name: String,
    /// Last-modified timestamp string from the API, if present.
    pub last_modified: Option<String>,
    /// File version identifier from the API, if present.
    pub version: Option<String>,
    /// Drawable nodes, in document order.
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            last_modified: None,
            version: None,
            nodes: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{BoundingBox, NodeType};

    #[test]
    fn test_document_create() {
        let doc = Document::new("wireframes");
        assert_eq!(doc.name, "wireframes");
        assert_eq!(doc.node_count(), 0);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_document_holds_nodes() {
        let mut doc = Document::new("test");
        doc.nodes.push(Node {
            id: "1:2".to_string(),
            name: "frame".to_string(),
            node_type: NodeType::Rectangle,
            shape_type: None,
            bounding_box: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            fill: None,
            characters: None,
            font: None,
        });
        assert_eq!(doc.node_count(), 1);
        assert!(!doc.is_empty());
    }
}
