//! Procedural geometry for the morphing prism viewer
//!
//! The one piece of real algorithmic content in this project: a pure,
//! deterministic generator that turns `(radius, height, morph factor)` into
//! the flat vertex list the renderer consumes each frame.

mod prism;

pub use prism::{effective_radius, PrismMesh, PrismParams};
