//! Input handling for the morphing prism viewer
//!
//! Maps raw pointer events to the viewer's interaction state: drag-to-rotate
//! and the control-bar morph slider.

mod interaction;

pub use interaction::{ControlBarBounds, InteractionMode, InteractionState};
