//! Morphprism - interactive morphing prism viewer
//!
//! Library surface for the application crate: configuration loading and the
//! window/render systems used by the binary and the integration tests.

pub mod config;
pub mod systems;
