use figscope_core::Document;

use crate::frame::{build_frame, RenderFrame};
use crate::viewport::ViewTransform;

/// Canvas state: the current document, the transform computed from it, and
/// the needs-redraw flag.
///
/// The document and transform are only ever replaced together, so a
/// transform is never applied to a node list it wasn't computed from.
#[derive(Debug, Clone)]
pub struct Scene {
    document: Document,
    transform: ViewTransform,
    dirty: bool,
}

impl Scene {
    /// A fresh scene holds an empty document and starts dirty, so the first
    /// paint pass emits the "No objects" placeholder.
    pub fn new() -> Self {
        Self {
            document: Document::default(),
            transform: ViewTransform::identity(),
            dirty: true,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn node_count(&self) -> usize {
        self.document.node_count()
    }

    /// Install a freshly fetched document: fit the viewport to its nodes,
    /// swap both in together, and mark the scene for repaint.
    pub fn install(&mut self, document: Document, canvas_width: f64, canvas_height: f64) {
        self.transform = ViewTransform::fit(&document.nodes, canvas_width, canvas_height);
        self.document = document;
        self.dirty = true;
        log::info!(
            "installed document '{}' with {} nodes, scale {:.4}",
            self.document.name,
            self.document.node_count(),
            self.transform.scale
        );
    }

    /// Re-arm the scene after an expose or resize.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The repaint pass. `None` while clean — no drawing work to do; a
    /// fresh frame when dirty, after which the scene settles clean.
    pub fn repaint(&mut self, canvas_width: f64, canvas_height: f64) -> Option<RenderFrame> {
        if !self.dirty {
            return None;
        }
        let frame = build_frame(
            &self.document.nodes,
            &self.transform,
            canvas_width,
            canvas_height,
        );
        self.dirty = false;
        Some(frame)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PaintOp;
    use figscope_core::node::{BoundingBox, FillColor, Node, NodeType};

    fn document_with_rect() -> Document {
        let mut doc = Document::new("test");
        doc.nodes.push(Node {
            id: "1:1".to_string(),
            name: "rect".to_string(),
            node_type: NodeType::Rectangle,
            shape_type: None,
            bounding_box: BoundingBox::new(10.0, 10.0, 100.0, 50.0),
            fill: Some(FillColor::new(1.0, 0.0, 0.0, 1.0)),
            characters: None,
            font: None,
        });
        doc
    }

    #[test]
    fn test_fresh_scene_paints_placeholder_once() {
        let mut scene = Scene::new();
        assert!(scene.is_dirty());
        let frame = scene.repaint(800.0, 600.0).expect("first pass paints");
        assert!(matches!(&frame.ops[0], PaintOp::Text { text, .. } if text == "No objects"));
        assert!(!scene.is_dirty());
    }

    #[test]
    fn test_repaint_in_clean_state_is_a_noop() {
        let mut scene = Scene::new();
        assert!(scene.repaint(800.0, 600.0).is_some());
        assert!(scene.repaint(800.0, 600.0).is_none());
        assert!(scene.repaint(800.0, 600.0).is_none());
    }

    #[test]
    fn test_install_fits_and_marks_dirty() {
        let mut scene = Scene::new();
        scene.repaint(200.0, 200.0);
        assert!(!scene.is_dirty());

        scene.install(document_with_rect(), 200.0, 200.0);
        assert!(scene.is_dirty());
        assert_eq!(scene.node_count(), 1);
        assert!((scene.transform().scale - 2.0).abs() < 1e-10);

        let frame = scene.repaint(200.0, 200.0).expect("dirty scene repaints");
        assert_eq!(frame.ops.len(), 1);
        assert!(matches!(frame.ops[0], PaintOp::Rect { .. }));
    }

    #[test]
    fn test_mark_dirty_rearms_repaint() {
        let mut scene = Scene::new();
        scene.install(document_with_rect(), 200.0, 200.0);
        scene.repaint(200.0, 200.0);
        assert!(scene.repaint(200.0, 200.0).is_none());

        scene.mark_dirty();
        assert!(scene.repaint(200.0, 200.0).is_some());
    }

    #[test]
    fn test_scene_untouched_when_no_install_happens() {
        // A failed fetch never reaches install; the pair stays intact.
        let mut scene = Scene::new();
        scene.install(document_with_rect(), 200.0, 200.0);
        let before = scene.transform();
        assert_eq!(scene.node_count(), 1);

        // ... fetch fails here, install is never called ...

        assert_eq!(scene.node_count(), 1);
        assert_eq!(scene.transform(), before);
        assert_eq!(scene.document().name, "test");
    }
}
