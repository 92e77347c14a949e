//! # Figscope I/O
//!
//! The document loader: a blocking Figma REST client plus the pure parser
//! that turns a file response into the core document model. Parsing is kept
//! free of the HTTP layer so it can be exercised on fixtures.

pub mod figma;

pub use figma::{parse_document, FigmaClient, FigmaError};
