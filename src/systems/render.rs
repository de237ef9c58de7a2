//! GPU rendering system
//!
//! Owns the render context and the two pipelines, and turns the per-frame
//! mesh plus interaction state into draw calls.

use std::sync::Arc;
use winit::window::Window;

use morphprism_core::PrismMesh;
use morphprism_math::{mat4, Vec3};
use morphprism_render::{PrismPipeline, PrismUniforms, RenderContext, WidgetPipeline};

use crate::config::{AppConfig, CameraConfig, RenderingConfig};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    prism_pipeline: PrismPipeline,
    widget_pipeline: WidgetPipeline,
    camera_config: CameraConfig,
    rendering_config: RenderingConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(window: Arc<Window>, config: &AppConfig) -> Self {
        let context = pollster::block_on(RenderContext::with_vsync(
            window,
            config.window.vsync,
        ));

        // Vertex counts are a closed form of the polygon constants
        let n = config.prism.sides as usize;
        let m = config.prism.subdivisions as usize;
        let vertex_capacity = 2 * (n + 1) * (m + 1) + 2 * 3 * n;

        let mut prism_pipeline =
            PrismPipeline::new(&context.device, context.config.format, vertex_capacity);
        prism_pipeline.ensure_depth_texture(
            &context.device,
            context.size.width.max(1),
            context.size.height.max(1),
        );

        let widget_pipeline = WidgetPipeline::new(
            &context.device,
            context.config.format,
            config.rendering.track_color,
            config.rendering.handle_color,
        );

        log::info!(
            "Render system ready: {} vertex capacity, {}x{} surface",
            vertex_capacity,
            context.size.width,
            context.size.height
        );

        Self {
            context,
            prism_pipeline,
            widget_pipeline,
            camera_config: config.camera.clone(),
            rendering_config: config.rendering.clone(),
        }
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.prism_pipeline
            .ensure_depth_texture(&self.context.device, width.max(1), height.max(1));
    }

    /// Current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }

    /// Render a single frame
    ///
    /// `angles` are the accumulated drag rotation angles in degrees
    /// (around X, around Y); `morph` positions the control-bar handle.
    pub fn render_frame(
        &mut self,
        mesh: &PrismMesh,
        angles: (f32, f32),
        morph: f32,
    ) -> Result<(), RenderError> {
        // Full re-upload every frame: the mesh is tens of points, simplicity
        // wins over caching
        self.prism_pipeline.upload_mesh(&self.context.queue, mesh);

        let (angle_x, angle_y) = angles;
        let model = mat4::mul(
            mat4::rotation_x(angle_x.to_radians()),
            mat4::rotation_y(angle_y.to_radians()),
        );
        let eye = self.camera_config.eye;
        let view = mat4::look_at(Vec3::new(eye[0], eye[1], eye[2]), Vec3::ZERO, Vec3::Y);
        let projection = mat4::perspective(
            self.camera_config.fov.to_radians(),
            self.context.aspect_ratio(),
            self.camera_config.near,
            self.camera_config.far,
        );

        self.prism_pipeline.update_uniforms(
            &self.context.queue,
            &PrismUniforms {
                model,
                view,
                projection,
                color: self.rendering_config.prism_color,
            },
        );
        self.widget_pipeline.update_handle(&self.context.queue, morph);

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view_texture = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let bg = &self.rendering_config.background_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view_texture,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg[0] as f64,
                            g: bg[1] as f64,
                            b: bg[2] as f64,
                            a: bg[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.prism_pipeline.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Solid first, then the overlay on top
            self.prism_pipeline.draw(&mut render_pass, mesh);
            self.widget_pipeline.draw(&mut render_pass);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }
}
