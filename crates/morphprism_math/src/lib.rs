//! Math primitives for the morphprism viewer
//!
//! Provides the [`Vec3`] vertex type and column-major [`Mat4`] helpers used
//! to build the model/view/projection transforms.

mod vec3;
pub mod mat4;

pub use vec3::Vec3;
pub use mat4::Mat4;
