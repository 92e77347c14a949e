//! # Figscope Renderer
//!
//! Turns a fetched document into canvas paint operations. The viewport
//! fitter computes a uniform scale and offset containing every node box,
//! the frame builder maps each node to primitive paint ops, and the scene
//! tracks the clean/dirty repaint state.
//!
//! Paint ops are plain serializable data; the app shell hands them to its
//! canvas as JSON and owns the actual pixel and glyph work.

pub mod viewport;
pub mod frame;
pub mod scene;

pub use frame::{PaintOp, RenderError, RenderFrame};
pub use scene::Scene;
pub use viewport::{ScreenRect, ViewTransform};
