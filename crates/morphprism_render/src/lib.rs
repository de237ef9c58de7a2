//! Rendering collaborator for the morphing prism viewer
//!
//! Thin wgpu plumbing around a fixed pipeline pair:
//!
//! - [`context::RenderContext`] - device, queue, and surface management
//! - [`pipeline::PrismPipeline`] - depth-tested 3D solid (triangle strip for
//!   the lateral band, triangle list for the caps)
//! - [`pipeline::WidgetPipeline`] - 2D control-bar overlay drawn on top
//!
//! The core supplies a flat vertex list each frame plus the transform
//! matrices and the morph factor; everything here just uploads and draws.

pub mod context;
pub mod pipeline;

pub use context::RenderContext;
pub use pipeline::{PrismPipeline, PrismUniforms, WidgetPipeline, WidgetUniforms};
