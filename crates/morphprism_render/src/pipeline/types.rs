//! GPU-compatible uniform types
//!
//! These types match the WGSL uniform struct layouts exactly. All derive Pod
//! and Zeroable for safe buffer writes.

use bytemuck::{Pod, Zeroable};
use morphprism_math::mat4;

/// Uniforms for the 3D prism pass
/// Layout: 208 bytes total (must match prism.wgsl PrismUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PrismUniforms {
    /// Model matrix (64 bytes)
    pub model: [[f32; 4]; 4],
    /// View matrix (64 bytes)
    pub view: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection: [[f32; 4]; 4],
    /// Flat fill color (16 bytes)
    pub color: [f32; 4],
}

impl Default for PrismUniforms {
    fn default() -> Self {
        Self {
            model: mat4::IDENTITY,
            view: mat4::IDENTITY,
            projection: mat4::IDENTITY,
            color: [0.5, 0.5, 1.0, 1.0],
        }
    }
}

/// Uniforms for the 2D widget pass
/// Layout: 32 bytes total (must match widget.wgsl WidgetUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct WidgetUniforms {
    /// Flat fill color
    pub color: [f32; 4],
    /// NDC translation applied to the quad
    pub offset: [f32; 2],
    /// Padding to a 16-byte multiple
    pub _padding: [f32; 2],
}

impl Default for WidgetUniforms {
    fn default() -> Self {
        Self {
            color: [1.0; 4],
            offset: [0.0; 2],
            _padding: [0.0; 2],
        }
    }
}
