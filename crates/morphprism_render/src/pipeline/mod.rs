//! Render pipelines for the prism solid and the control-bar widget

mod prism_pipeline;
mod types;
mod widget_pipeline;

pub use prism_pipeline::{PrismPipeline, DEPTH_FORMAT};
pub use types::{PrismUniforms, WidgetUniforms};
pub use widget_pipeline::WidgetPipeline;
